//! Interactive chat loop wiring the panes to the relay client.

use std::collections::HashMap;

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use charla_client::RelayClient;
use charla_types::{ChatTurn, Role};

use crate::agents::{self, Agent};
use crate::pane::ChatPane;

const CONNECTING: &str = "Conectando a la API... Por favor, espera.";

// ============================================================================
// Session
// ============================================================================

/// Interactive session: one pane per agent plus the shared note list.
pub struct Session {
    panes: HashMap<&'static str, ChatPane>,
    active: &'static Agent,
    notes: Vec<String>,
    connected: bool,
}

impl Session {
    pub fn new(start: &'static Agent) -> Self {
        Self {
            panes: HashMap::new(),
            active: start,
            notes: Vec::new(),
            connected: false,
        }
    }

    pub fn active(&self) -> &'static Agent {
        self.active
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        for pane in self.panes.values_mut() {
            pane.set_connected(connected);
        }
    }

    /// The active agent's pane, created on first use.
    pub fn active_pane_mut(&mut self) -> &mut ChatPane {
        let connected = self.connected;
        self.panes.entry(self.active.slug).or_insert_with(|| {
            let mut pane = ChatPane::new();
            pane.set_connected(connected);
            pane
        })
    }

    /// Switch the active agent; transcripts of other panes are kept.
    pub fn switch(&mut self, slug: &str) -> Option<&'static Agent> {
        let agent = agents::find(slug)?;
        self.active = agent;
        Some(agent)
    }

    /// Save a note, refusing blank text.
    pub fn add_note(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.notes.push(text.to_string());
        true
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub(crate) fn format_turn(turn: &ChatTurn) -> String {
    let speaker = match turn.role {
        Role::System => "Sistema",
        Role::User => "Tú",
        Role::Assistant => "Asistente",
    };
    format!("{speaker}: {}", turn.content)
}

fn render_pane(pane: &ChatPane) {
    for turn in pane.turns() {
        println!("{}", format_turn(turn));
    }
    if let Some(banner) = pane.banner() {
        println!("[error] {banner}");
    }
}

fn print_help() {
    println!("Comandos:");
    println!("  /agents          lista los agentes disponibles");
    println!("  /agent <slug>    cambia al agente indicado");
    println!("  /note <texto>    guarda una nota");
    println!("  /notes           lista las notas guardadas");
    println!("  /clear           reinicia la conversación del agente activo");
    println!("  /quit            sale del programa");
}

// ============================================================================
// Loop
// ============================================================================

pub async fn run(client: RelayClient, start: &'static Agent) -> anyhow::Result<()> {
    let mut session = Session::new(start);

    println!("Charla — escribe un mensaje o /help para ver los comandos.");
    println!("{CONNECTING}");
    match client.probe().await {
        Ok(()) => {
            session.set_connected(true);
            println!("Conectado. Agente activo: {}", session.active().label);
        }
        Err(e) => {
            session.set_connected(false);
            println!("[error] {}", e.banner());
        }
    }

    let mut editor = Reedline::create();
    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(session.active().label.to_string()),
            DefaultPromptSegment::Empty,
        );

        let line = match editor.read_line(&prompt)? {
            Signal::Success(line) => line,
            Signal::CtrlC | Signal::CtrlD => break,
        };

        if let Some(command) = line.trim().strip_prefix('/') {
            if handle_command(command, &mut session) {
                break;
            }
            continue;
        }

        let Some(outgoing) = session.active_pane_mut().submit(&line) else {
            if !session.connected() {
                println!("{CONNECTING}");
            }
            continue;
        };

        let outcome = client.send(&outgoing).await;
        let pane = session.active_pane_mut();
        match outcome {
            Ok(turn) => {
                println!("{}", format_turn(&turn));
                pane.resolve(Ok(turn));
            }
            Err(e) => {
                let banner = e.banner();
                println!("[error] {banner}");
                pane.resolve(Err(banner));
            }
        }
    }

    Ok(())
}

/// Handle a slash command; returns `true` when the session should end.
fn handle_command(command: &str, session: &mut Session) -> bool {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "help" => print_help(),
        "agents" => {
            for agent in agents::AGENTS {
                let marker = if agent.slug == session.active().slug {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {} ({})", agent.label, agent.slug);
            }
        }
        "agent" => match session.switch(rest) {
            Some(agent) => {
                println!("Agente activo: {}", agent.label);
                render_pane(session.active_pane_mut());
            }
            None => println!("Agente desconocido: {rest}. Usa /agents."),
        },
        "note" => {
            if session.add_note(rest) {
                println!("Nota guardada.");
            } else {
                println!("La nota está vacía.");
            }
        }
        "notes" => {
            if session.notes().is_empty() {
                println!("No hay notas guardadas.");
            } else {
                for (i, note) in session.notes().iter().enumerate() {
                    println!("{}. {note}", i + 1);
                }
            }
        }
        "clear" => {
            session.active_pane_mut().clear();
            println!("Conversación reiniciada.");
        }
        "quit" | "exit" => return true,
        _ => println!("Comando desconocido: /{name}. Usa /help."),
    }

    false
}
