// Page copy. Markup in index.html only carries empty containers; the shell
// fills them from here.
use kova_core::{Card, ToggleOption};

pub struct Entry {
    pub title: &'static str,
    pub body: &'static str,
}

const DECK: [(&str, &str, &str); 5] = [
    (
        "Experiencia Genérica",
        "Los usuarios reciben beneficios estándar que no se adaptan a sus necesidades individuales, reduciendo su satisfacción y engagement.",
        "frown",
    ),
    (
        "Soporte Lento",
        "Los procesos de atención al cliente son lentos e ineficientes, generando frustración y pérdida de tiempo valioso.",
        "clock",
    ),
    (
        "Procesos Confusos",
        "La navegación y gestión de beneficios es compleja y poco intuitiva, dificultando el acceso a los servicios.",
        "shuffle",
    ),
    (
        "Falta de Transparencia",
        "Los usuarios no tienen visibilidad clara de sus beneficios disponibles ni del estado de sus solicitudes.",
        "search",
    ),
    (
        "Costos Elevados",
        "Los gastos administrativos y operativos son altos debido a procesos manuales y sistemas desactualizados.",
        "trending-down",
    ),
];

/// Hero deck, front to back. Ids start at 1.
pub fn deck_cards() -> Vec<Card> {
    DECK.iter()
        .zip(1..)
        .map(|((title, body, icon), id)| Card::new(id, *title, *body, *icon))
        .collect()
}

pub const PROBLEM_CARDS: [Entry; 5] = [
    Entry {
        title: "Experiencia Genérica",
        body: "Los empleados reciben beneficios estándar que no se adaptan a sus necesidades individuales.",
    },
    Entry {
        title: "Soporte Lento",
        body: "Los procesos de atención al cliente son lentos e ineficientes.",
    },
    Entry {
        title: "Procesos Confusos",
        body: "La navegación y gestión de beneficios es compleja y poco intuitiva.",
    },
    Entry {
        title: "Falta de Transparencia",
        body: "Los empleados no tienen visibilidad clara de sus beneficios disponibles.",
    },
    Entry {
        title: "Costos Elevados",
        body: "Los gastos administrativos y operativos son altos debido a procesos manuales.",
    },
];

pub const CONNECTION_METHODS: [Entry; 3] = [
    Entry {
        title: "API",
        body: "Integración perfecta con tu infraestructura existente",
    },
    Entry {
        title: "App White-Label",
        body: "Solución completa personalizada con tu marca",
    },
    Entry {
        title: "Web App",
        body: "Plataforma web lista para usar desde el primer día",
    },
];

pub const ROTATING_BASE: &str = "Mas Conexión, Mas Uso, Mas";
pub const ROTATING_WORDS: [&str; 4] = ["Valor", "Impacto", "Resultados", "Beneficios"];

pub fn toggle_label(option: ToggleOption) -> &'static str {
    match option {
        ToggleOption::A => "Instituciones",
        ToggleOption::B => "Aliados",
    }
}

pub fn panel(option: ToggleOption) -> Entry {
    match option {
        ToggleOption::A => Entry {
            title: "La Arquitectura de la Lealtad Moderna.",
            body: "Evolucionar tu programa de lealtad nunca fue tan fácil. Ofrece experiencias digitales relevantes y personalizables que conectan con cada cliente.",
        },
        ToggleOption::B => Entry {
            title: "El Canal de Crecimiento que tu Marca Merece.",
            body: "Accede al canal de distribución más valioso de LATAM. Posicionamos tu marca dentro de un ecosistema exclusivo de beneficios digitales, conectándote directamente con millones de usuarios de alto valor sin costo de adquisición.",
        },
    }
}
