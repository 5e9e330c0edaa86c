//! Static directory of chat agents, one per pane of the stock layout.

/// One selectable agent profile.
#[derive(Debug, PartialEq, Eq)]
pub struct Agent {
    pub slug: &'static str,
    pub label: &'static str,
}

/// The six agents of the stock sidebar.
pub const AGENTS: &[Agent] = &[
    Agent {
        slug: "ventas",
        label: "Ventas",
    },
    Agent {
        slug: "soporte",
        label: "Soporte",
    },
    Agent {
        slug: "consultas",
        label: "Consultas",
    },
    Agent {
        slug: "estrategia",
        label: "Estrategia",
    },
    Agent {
        slug: "internacional",
        label: "Internacional",
    },
    Agent {
        slug: "desarrollo",
        label: "Desarrollo",
    },
];

/// Look an agent up by slug, case-insensitively.
pub fn find(slug: &str) -> Option<&'static Agent> {
    AGENTS.iter().find(|agent| agent.slug.eq_ignore_ascii_case(slug))
}
