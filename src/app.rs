use std::collections::VecDeque;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::system::sampler::Sampler;
use crate::system::snapshot::UsageReading;
use crate::ui::theme::{HeatOverrides, Theme};

const CPU_HISTORY_CAPACITY: usize = 60;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub pause: KeyCode,
    pub refresh: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            pause: parse_key(&kb.pause).unwrap_or(KeyCode::Char('p')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for the help overlay.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.pause), "Pause/resume sampling"),
            (key_label(self.refresh), "Sample now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub reading: UsageReading,
    pub cpu_history: VecDeque<u64>,
    pub paused: bool,
    pub show_help: bool,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    pub hostname: Option<String>,
    sampler: Sampler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);
        let theme = Theme::from_config(
            &config.colors.theme,
            &HeatOverrides::from_config(&config.colors),
        );
        App {
            running: true,
            reading: UsageReading::default(),
            cpu_history: VecDeque::with_capacity(CPU_HISTORY_CAPACITY),
            paused: false,
            show_help: false,
            theme,
            keybinds,
            hostname: sysinfo::System::host_name(),
            sampler: Sampler::new(PathBuf::from(&config.general.disk_path)),
        }
    }

    /// Scheduled tick: sample unless paused and feed the sparkline buffer.
    pub fn refresh_data(&mut self) {
        if self.paused {
            return;
        }
        self.force_refresh();
    }

    /// Samples regardless of the paused flag (manual refresh key).
    pub fn force_refresh(&mut self) {
        self.reading = self.sampler.sample();
        if self.cpu_history.len() == CPU_HISTORY_CAPACITY {
            self.cpu_history.pop_front();
        }
        // Sparkline wants integers; scale percent by 100 to keep a decimal.
        let scaled = (self.reading.cpu_percent * 100.0).round() as u64;
        self.cpu_history.push_back(scaled.min(10_000));
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        if self.show_help && key.code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        match key.code {
            code if code == self.keybinds.quit => Action::Quit,
            code if code == self.keybinds.pause => Action::TogglePause,
            code if code == self.keybinds.refresh => Action::Refresh,
            code if code == self.keybinds.cycle_theme => Action::CycleTheme,
            code if code == self.keybinds.help => Action::ToggleHelp,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::TogglePause => self.paused = !self.paused,
            Action::Refresh => self.force_refresh(),
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn default_keys_map_to_actions() {
        let app = test_app();
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.map_key(key(KeyCode::Char('p'))), Action::TogglePause);
        assert_eq!(app.map_key(key(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(app.map_key(key(KeyCode::Char('t'))), Action::CycleTheme);
        assert_eq!(app.map_key(key(KeyCode::Char('?'))), Action::ToggleHelp);
        assert_eq!(app.map_key(key(KeyCode::Char('z'))), Action::None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let app = test_app();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(event), Action::Quit);
    }

    #[test]
    fn quit_action_stops_the_app() {
        let mut app = test_app();
        app.dispatch(Action::Quit);
        assert!(!app.running);
    }

    #[test]
    fn pause_skips_scheduled_refresh() {
        let mut app = test_app();
        app.dispatch(Action::TogglePause);
        assert!(app.paused);
        app.refresh_data();
        assert!(app.cpu_history.is_empty());

        // Manual refresh still samples while paused.
        app.dispatch(Action::Refresh);
        assert_eq!(app.cpu_history.len(), 1);
    }

    #[test]
    fn esc_closes_help_overlay() {
        let mut app = test_app();
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help);
        assert_eq!(app.map_key(key(KeyCode::Esc)), Action::ToggleHelp);
    }

    #[test]
    fn cpu_history_is_bounded() {
        let mut app = test_app();
        for _ in 0..(CPU_HISTORY_CAPACITY + 10) {
            app.force_refresh();
        }
        assert_eq!(app.cpu_history.len(), CPU_HISTORY_CAPACITY);
    }

    #[test]
    fn theme_cycles_on_dispatch() {
        let mut app = test_app();
        assert_eq!(app.theme.name, "dark");
        app.dispatch(Action::CycleTheme);
        assert_eq!(app.theme.name, "light");
    }
}
