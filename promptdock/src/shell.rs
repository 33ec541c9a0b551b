//! Interactive terminal host
//!
//! Owns the panels and the Plugins menu. Plugins only see it through
//! [`HostContext`].

use promptdock_core::error::{Error, Result};
use promptdock_plugin::{HostContext, MenuItem, Panel};
use std::io::{self, BufRead, Write};

struct MenuEntry {
    plugin: String,
    item: MenuItem,
}

/// Terminal shell hosting plugin panels and menu actions
#[derive(Default)]
pub struct Shell {
    panels: Vec<Panel>,
    /// Revision on screen per panel; `None` while hidden, so showing a panel
    /// again redraws it
    shown: Vec<Option<u64>>,
    menu: Vec<MenuEntry>,
}

impl HostContext for Shell {
    fn attach_panel(&mut self, title: &str) -> Panel {
        tracing::debug!("Attaching panel {}", title);
        let panel = Panel::new(title);
        self.panels.push(panel.clone());
        self.shown.push(Some(panel.revision()));
        panel
    }

    fn register_menu_action(&mut self, plugin: &str, item: MenuItem) {
        tracing::debug!("Menu action {} > {}", plugin, item.name);
        self.menu.push(MenuEntry {
            plugin: plugin.to_string(),
            item,
        });
    }

    fn detach_panel(&mut self, panel: &Panel) {
        if let Some(index) = self.panels.iter().position(|p| p.same(panel)) {
            tracing::debug!("Detaching panel {}", panel.title());
            self.panels.remove(index);
            self.shown.remove(index);
        }
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Menu action names, numbered from 1
    pub fn actions(&self) -> Vec<(usize, &str, &str)> {
        self.menu
            .iter()
            .enumerate()
            .map(|(i, e)| (i + 1, e.plugin.as_str(), e.item.name.as_str()))
            .collect()
    }

    /// The Plugins menu, grouped by plugin
    pub fn menu_listing(&self) -> String {
        if self.menu.is_empty() {
            return "Plugins: (none loaded)".to_string();
        }

        let mut out = String::from("Plugins");
        let mut current: Option<&str> = None;
        for (number, plugin, action) in self.actions() {
            if current != Some(plugin) {
                out.push_str(&format!("\n  {}", plugin));
                current = Some(plugin);
            }
            out.push_str(&format!("\n    {:>2}. {}", number, action));
        }
        out
    }

    /// Run menu action `number` (1-based)
    pub fn trigger(&self, number: usize, args: &str) -> Result<()> {
        let entry = number
            .checked_sub(1)
            .and_then(|i| self.menu.get(i))
            .ok_or_else(|| Error::Plugin(format!("No menu action {}", number)))?;

        tracing::info!("▶️ {} > {}", entry.plugin, entry.item.name);
        entry.item.trigger(args)
    }

    /// Read commands from `input` until EOF or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.menu_listing())?;
        writeln!(out, "Type 'help' for commands.")?;
        self.write_changed_panels(&mut out)?;
        prompt(&mut out)?;

        for line in input.lines() {
            let line = line?;
            let line = line.trim();

            let (command, args) = match line.split_once(char::is_whitespace) {
                Some((command, args)) => (command, args.trim_start()),
                None => (line, ""),
            };

            match command {
                "" => {}
                "quit" | "exit" => break,
                "help" => writeln!(out, "{}", HELP)?,
                "menu" => writeln!(out, "{}", self.menu_listing())?,
                "panels" => self.write_visible_panels(&mut out)?,
                _ => match command.parse::<usize>() {
                    Ok(number) => {
                        if let Err(e) = self.trigger(number, args) {
                            tracing::error!("Action {} failed: {}", number, e);
                            writeln!(out, "❌ {}", e)?;
                        }
                        self.write_changed_panels(&mut out)?;
                    }
                    Err(_) => writeln!(out, "Unknown command '{}'. Type 'help'.", command)?,
                },
            }
            prompt(&mut out)?;
        }

        writeln!(out)?;
        Ok(())
    }

    fn write_changed_panels<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        for (panel, shown) in self.panels.iter().zip(self.shown.iter_mut()) {
            if !panel.is_visible() {
                *shown = None;
                continue;
            }
            let revision = panel.revision();
            if *shown != Some(revision) {
                write_panel(out, panel)?;
                *shown = Some(revision);
            }
        }
        Ok(())
    }

    fn write_visible_panels<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        for (panel, shown) in self.panels.iter().zip(self.shown.iter_mut()) {
            if panel.is_visible() {
                write_panel(out, panel)?;
                *shown = Some(panel.revision());
            }
        }
        Ok(())
    }
}

const HELP: &str = "\
Commands:
  menu            list plugin actions
  <n> [args]      run action n with optional arguments
  panels          show all visible panels
  help            show this help
  quit | exit     leave the shell";

fn write_panel<W: Write>(out: &mut W, panel: &Panel) -> io::Result<()> {
    writeln!(out, "┌─ {} ", panel.title())?;
    for line in panel.text().lines() {
        writeln!(out, "│ {}", line)?;
    }
    writeln!(out, "└─")
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
