//! Command registry for the command palette.
//!
//! Provides the static command catalog, prefix/substring search and the
//! dynamic clear-duration commands synthesized at search time.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::dynamic::parse_dynamic_clear;
use crate::config::{keys, Theme};
use crate::content_type::ContentType;

/// A command that can be executed from the command palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Unique identifier for the command.
    pub id: String,
    /// Text the user types to invoke the command.
    pub trigger: String,
    /// Short explanation shown next to the trigger.
    pub description: String,
    /// Symbolic icon name, interpreted by the host UI.
    pub icon: &'static str,
    /// Category for organization.
    pub category: CommandCategory,
    /// Whether running the command discards data.
    pub is_destructive: bool,
    /// The action to perform when executed.
    #[serde(skip)]
    pub action: CommandAction,
}

/// Categories for organizing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    /// Delete clipboard history.
    Clear,
    /// Pause or resume clipboard capture.
    Monitoring,
    /// Application settings and appearance.
    Settings,
    /// Open windows or leave the app.
    Navigation,
    /// Filter the main window by content type.
    Filter,
    /// Help and miscellany.
    Utility,
}

impl CommandCategory {
    /// All categories, in catalog order.
    pub const ALL: [CommandCategory; 6] = [
        CommandCategory::Clear,
        CommandCategory::Monitoring,
        CommandCategory::Settings,
        CommandCategory::Navigation,
        CommandCategory::Filter,
        CommandCategory::Utility,
    ];

    /// Get the display name for this category.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Monitoring => "Monitoring",
            Self::Settings => "Settings",
            Self::Navigation => "Navigation",
            Self::Filter => "Filter",
            Self::Utility => "Utility",
        }
    }
}

/// Actions that can be triggered by commands.
///
/// Actions are plain data; they are run against an
/// [`ExecutionContext`](super::ExecutionContext) that supplies the host
/// handlers and the settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Delete entries captured within the last `minutes`.
    ClearRecent { minutes: u32 },
    /// Ask for confirmation before deleting everything.
    ConfirmClearAll,
    /// Delete every entry. Only reached through confirmation.
    ClearAll,
    /// Pause or resume clipboard monitoring.
    SetMonitoringPaused(bool),
    /// Turn a boolean setting on or off.
    SetToggle {
        key: &'static str,
        name: &'static str,
        enabled: bool,
    },
    /// Change the UI appearance.
    SetTheme(Theme),
    /// Open the settings window.
    OpenSettings,
    /// Check for a newer release.
    CheckForUpdates,
    /// Show the release notes.
    OpenReleaseNotes,
    /// Quit the application.
    Quit,
    /// Open the main window filtered to one content type.
    FilterContent(ContentType),
    /// Show the list of commands.
    ShowHelp,
}

/// A boolean setting exposed as an on/off command pair.
struct ToggleSetting {
    id: &'static str,
    key: &'static str,
    name: &'static str,
    icon: &'static str,
}

const TOGGLES: &[ToggleSetting] = &[
    ToggleSetting {
        id: "sounds",
        key: keys::PLAY_SOUNDS,
        name: "sounds",
        icon: "speaker.wave.2",
    },
    ToggleSetting {
        id: "notifications",
        key: keys::SHOW_NOTIFICATIONS,
        name: "notifications",
        icon: "bell",
    },
    ToggleSetting {
        id: "images",
        key: keys::STORE_IMAGES,
        name: "image storage",
        icon: "photo",
    },
    ToggleSetting {
        id: "dedupe",
        key: keys::DEDUPLICATE_ENTRIES,
        name: "deduplication",
        icon: "square.on.square",
    },
    ToggleSetting {
        id: "extract",
        key: keys::EXTRACT_CONTENT,
        name: "content extraction",
        icon: "text.viewfinder",
    },
    ToggleSetting {
        id: "apikeys",
        key: keys::SKIP_API_KEYS,
        name: "API key filtering",
        icon: "key",
    },
];

/// Fixed clear durations: (trigger label, minutes).
const CLEAR_DURATIONS: &[(&str, u32)] = &[("10 mins", 10), ("1 hour", 60), ("1 day", 1440)];

impl Command {
    fn new(
        id: impl Into<String>,
        trigger: impl Into<String>,
        description: impl Into<String>,
        icon: &'static str,
        category: CommandCategory,
        action: CommandAction,
    ) -> Self {
        Self {
            id: id.into(),
            trigger: trigger.into(),
            description: description.into(),
            icon,
            category,
            is_destructive: false,
            action,
        }
    }

    fn destructive(mut self) -> Self {
        self.is_destructive = true;
        self
    }
}

/// Capitalize the first character of a display name.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn clear_commands() -> Vec<Command> {
    let mut commands: Vec<Command> = CLEAR_DURATIONS
        .iter()
        .map(|(label, minutes)| {
            Command::new(
                format!("clear-{}", label.replace(' ', "-")),
                format!("clear {}", label),
                format!("Clear entries from the last {}", label),
                "clock.arrow.circlepath",
                CommandCategory::Clear,
                CommandAction::ClearRecent { minutes: *minutes },
            )
        })
        .collect();

    commands.push(
        Command::new(
            "clear-all",
            "clear all",
            "Clear the entire clipboard history",
            "trash",
            CommandCategory::Clear,
            CommandAction::ConfirmClearAll,
        )
        .destructive(),
    );

    commands
}

fn monitoring_commands() -> Vec<Command> {
    vec![
        Command::new(
            "pause",
            "pause",
            "Pause clipboard monitoring",
            "pause.circle",
            CommandCategory::Monitoring,
            CommandAction::SetMonitoringPaused(true),
        ),
        Command::new(
            "resume",
            "resume",
            "Resume clipboard monitoring",
            "play.circle",
            CommandCategory::Monitoring,
            CommandAction::SetMonitoringPaused(false),
        ),
    ]
}

fn toggle_commands() -> Vec<Command> {
    TOGGLES
        .iter()
        .flat_map(|toggle| {
            [(true, "on", "Turn on"), (false, "off", "Turn off")].map(|(enabled, state, verb)| {
                Command::new(
                    format!("{}-{}", toggle.id, state),
                    format!("{} {}", toggle.name, state),
                    format!("{} {}", verb, toggle.name),
                    toggle.icon,
                    CommandCategory::Settings,
                    CommandAction::SetToggle {
                        key: toggle.key,
                        name: toggle.name,
                        enabled,
                    },
                )
            })
        })
        .collect()
}

fn theme_commands() -> Vec<Command> {
    Theme::ALL
        .iter()
        .map(|theme| {
            Command::new(
                format!("theme-{}", theme.as_str()),
                format!("theme {}", theme.as_str()),
                format!("Use the {} appearance", theme.as_str()),
                "circle.lefthalf.filled",
                CommandCategory::Settings,
                CommandAction::SetTheme(*theme),
            )
        })
        .collect()
}

fn navigation_commands() -> Vec<Command> {
    vec![
        Command::new(
            "settings",
            "settings",
            "Open settings",
            "gearshape",
            CommandCategory::Navigation,
            CommandAction::OpenSettings,
        ),
        Command::new(
            "updates",
            "updates",
            "Check for updates",
            "arrow.down.circle",
            CommandCategory::Navigation,
            CommandAction::CheckForUpdates,
        ),
        Command::new(
            "release-notes",
            "release notes",
            "Show what's new",
            "doc.richtext",
            CommandCategory::Navigation,
            CommandAction::OpenReleaseNotes,
        ),
        Command::new(
            "quit",
            "quit",
            "Quit the application",
            "power",
            CommandCategory::Navigation,
            CommandAction::Quit,
        ),
    ]
}

fn filter_commands() -> Vec<Command> {
    ContentType::ALL
        .iter()
        .map(|content_type| {
            Command::new(
                format!("filter-{}", content_type.plural()),
                content_type.plural(),
                format!("Show only {}", content_type.display().to_lowercase()),
                content_type.icon(),
                CommandCategory::Filter,
                CommandAction::FilterContent(*content_type),
            )
        })
        .collect()
}

fn help_commands() -> Vec<Command> {
    vec![Command::new(
        "help",
        "help",
        "List all commands",
        "questionmark.circle",
        CommandCategory::Utility,
        CommandAction::ShowHelp,
    )]
}

/// Build the full static catalog, in display order.
pub fn build_catalog() -> Vec<Command> {
    let mut commands = Vec::new();
    commands.extend(clear_commands());
    commands.extend(monitoring_commands());
    commands.extend(toggle_commands());
    commands.extend(theme_commands());
    commands.extend(navigation_commands());
    commands.extend(filter_commands());
    commands.extend(help_commands());
    commands
}

/// Registry of all available commands with search.
///
/// The catalog is shared behind an `Arc` and never mutated in place, so
/// concurrent searches need no locking. Consumers that want to react to a
/// rebuild can [`subscribe`](Self::subscribe).
pub struct CommandRegistry {
    /// All registered commands.
    commands: Arc<[Command]>,
    /// Publishes the catalog whenever it is rebuilt.
    updates: watch::Sender<Arc<[Command]>>,
}

impl CommandRegistry {
    /// Create a new command registry with the default catalog.
    pub fn new() -> Self {
        let commands: Arc<[Command]> = build_catalog().into();
        debug!(count = commands.len(), "Built command catalog");
        let (updates, _) = watch::channel(Arc::clone(&commands));

        Self { commands, updates }
    }

    /// Rebuild the catalog from the static tables and notify subscribers.
    pub fn rebuild(&mut self) {
        self.commands = build_catalog().into();
        debug!(count = self.commands.len(), "Rebuilt command catalog");
        self.updates.send_replace(Arc::clone(&self.commands));
    }

    /// Watch the catalog for rebuilds.
    pub fn subscribe(&self) -> watch::Receiver<Arc<[Command]>> {
        self.updates.subscribe()
    }

    /// Get all registered commands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Look up a catalog command by id.
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|cmd| cmd.id == id)
    }

    /// Search for commands matching the query.
    ///
    /// An empty query returns the whole catalog in order. A dynamic clear
    /// query (`clear 45 mins`) yields its synthesized command first,
    /// followed by catalog commands containing the query. Otherwise
    /// triggers starting with the query come before triggers merely
    /// containing it, each group in catalog order.
    pub fn search(&self, query: &str) -> Vec<Cow<'_, Command>> {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return self.commands.iter().map(Cow::Borrowed).collect();
        }

        if let Some(dynamic) = parse_dynamic_clear(&query) {
            let rest: Vec<Cow<'_, Command>> = self
                .commands
                .iter()
                .filter(|cmd| cmd.id != dynamic.id && cmd.trigger.to_lowercase().contains(&query))
                .map(Cow::Borrowed)
                .collect();

            let mut results = Vec::with_capacity(rest.len() + 1);
            results.push(Cow::Owned(dynamic));
            results.extend(rest);
            return results;
        }

        let mut prefix = Vec::new();
        let mut contains = Vec::new();
        for cmd in self.commands.iter() {
            let trigger = cmd.trigger.to_lowercase();
            if trigger.starts_with(&query) {
                prefix.push(Cow::Borrowed(cmd));
            } else if trigger.contains(&query) {
                contains.push(Cow::Borrowed(cmd));
            }
        }

        prefix.extend(contains);
        prefix
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(results: &[Cow<'_, Command>]) -> Vec<String> {
        results.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_new_registry() {
        let registry = CommandRegistry::new();
        assert!(!registry.commands().is_empty());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let registry = CommandRegistry::new();
        let unique: HashSet<_> = registry.commands().iter().map(|c| &c.id).collect();
        assert_eq!(unique.len(), registry.commands().len());
    }

    #[test]
    fn test_catalog_order() {
        let registry = CommandRegistry::new();
        let first: Vec<_> = registry.commands().iter().take(6).map(|c| c.id.as_str()).collect();
        assert_eq!(
            first,
            vec!["clear-10-mins", "clear-1-hour", "clear-1-day", "clear-all", "pause", "resume"]
        );
        assert_eq!(registry.commands().last().unwrap().id, "help");
    }

    #[test]
    fn test_catalog_size() {
        // 4 clear + 2 monitoring + 12 toggles + 3 themes + 4 navigation + 6 filters + help
        assert_eq!(build_catalog().len(), 32);
    }

    #[test]
    fn test_catalog_is_deterministic() {
        assert_eq!(build_catalog(), build_catalog());
    }

    #[test]
    fn test_categories_follow_construction_groups() {
        let registry = CommandRegistry::new();
        let mut seen = Vec::new();
        for cmd in registry.commands() {
            if seen.last() != Some(&cmd.category) {
                seen.push(cmd.category);
            }
        }
        assert_eq!(
            seen,
            vec![
                CommandCategory::Clear,
                CommandCategory::Monitoring,
                CommandCategory::Settings,
                CommandCategory::Navigation,
                CommandCategory::Filter,
                CommandCategory::Utility,
            ]
        );
    }

    #[test]
    fn test_only_clear_all_is_destructive() {
        let registry = CommandRegistry::new();
        let destructive: Vec<_> = registry
            .commands()
            .iter()
            .filter(|c| c.is_destructive)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(destructive, vec!["clear-all"]);
    }

    #[test]
    fn test_fixed_clear_minutes() {
        let registry = CommandRegistry::new();
        let minutes = |id: &str| match registry.get(id).unwrap().action {
            CommandAction::ClearRecent { minutes } => minutes,
            ref other => panic!("unexpected action {:?}", other),
        };
        assert_eq!(minutes("clear-10-mins"), 10);
        assert_eq!(minutes("clear-1-hour"), 60);
        assert_eq!(minutes("clear-1-day"), 1440);
    }

    #[test]
    fn test_toggle_pairs() {
        let registry = CommandRegistry::new();
        let on = registry.get("sounds-on").unwrap();
        let off = registry.get("sounds-off").unwrap();

        assert_eq!(on.trigger, "sounds on");
        assert_eq!(off.trigger, "sounds off");
        assert_eq!(
            on.action,
            CommandAction::SetToggle {
                key: keys::PLAY_SOUNDS,
                name: "sounds",
                enabled: true
            }
        );
        assert!(registry.get("apikeys-off").is_some());
    }

    #[test]
    fn test_catalog_ids_never_use_dynamic_suffix() {
        let registry = CommandRegistry::new();
        assert!(registry
            .commands()
            .iter()
            .all(|c| !c.id.ends_with("-dynamic")));
    }

    #[test]
    fn test_search_empty_query() {
        let registry = CommandRegistry::new();
        let results = registry.search("");
        assert_eq!(results.len(), registry.commands().len());

        let expected: Vec<_> = registry.commands().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids(&results), expected);
    }

    #[test]
    fn test_search_whitespace_query_is_empty() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.search("   ").len(), registry.commands().len());
    }

    #[test]
    fn test_search_case_insensitive() {
        let registry = CommandRegistry::new();

        let results_lower = registry.search("theme");
        let results_upper = registry.search("  THEME ");

        assert_eq!(ids(&results_lower), ids(&results_upper));
        assert_eq!(results_lower.len(), 3);
    }

    #[test]
    fn test_search_no_match() {
        let registry = CommandRegistry::new();
        assert!(registry.search("xyznomatch").is_empty());
    }

    #[test]
    fn test_search_prefix_before_contains() {
        let registry = CommandRegistry::new();
        let results = registry.search("s");

        let first_non_prefix = results
            .iter()
            .position(|c| !c.trigger.starts_with('s'))
            .unwrap();
        assert!(results[first_non_prefix..]
            .iter()
            .all(|c| !c.trigger.starts_with('s')));
        assert!(results[..first_non_prefix]
            .iter()
            .all(|c| c.trigger.starts_with('s')));
        assert_eq!(results[0].id, "sounds-on");
    }

    #[test]
    fn test_search_contains_keeps_catalog_order() {
        let registry = CommandRegistry::new();
        let results = registry.search("off");
        assert_eq!(
            ids(&results),
            vec![
                "sounds-off",
                "notifications-off",
                "images-off",
                "dedupe-off",
                "extract-off",
                "apikeys-off"
            ]
        );
    }

    #[test]
    fn test_search_image_prefers_earlier_catalog_entry() {
        let registry = CommandRegistry::new();
        let results = registry.search("image");
        assert_eq!(ids(&results), vec!["images-on", "images-off", "filter-images"]);
    }

    #[test]
    fn test_toggle_triggers_use_display_names() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.get("images-on").unwrap().trigger, "image storage on");
        assert_eq!(registry.get("dedupe-off").unwrap().trigger, "deduplication off");
        assert_eq!(registry.get("extract-on").unwrap().trigger, "content extraction on");
        assert_eq!(registry.get("apikeys-on").unwrap().trigger, "API key filtering on");

        assert_eq!(ids(&registry.search("deduplication")), vec!["dedupe-on", "dedupe-off"]);
        assert_eq!(ids(&registry.search("image storage on")), vec!["images-on"]);
    }

    #[test]
    fn test_search_dynamic_clear_first() {
        let registry = CommandRegistry::new();
        let results = registry.search("clear 5 mins");

        assert_eq!(results[0].id, "clear-5-mins-dynamic");
        assert_eq!(results[0].trigger, "clear 5 minutes");
        assert!(matches!(results[0], Cow::Owned(_)));
        assert_eq!(
            results.iter().filter(|c| c.id == "clear-5-mins-dynamic").count(),
            1
        );
    }

    #[test]
    fn test_search_dynamic_clear_includes_matching_catalog() {
        let registry = CommandRegistry::new();
        let results = registry.search("clear 10 mins");
        assert_eq!(ids(&results), vec!["clear-10-mins-dynamic", "clear-10-mins"]);
    }

    #[test]
    fn test_search_dynamic_clear_hours() {
        let registry = CommandRegistry::new();
        let results = registry.search("clear 2 hours");

        assert_eq!(results[0].action, CommandAction::ClearRecent { minutes: 120 });
        assert!(results[0].description.contains("2 hours"));
    }

    #[test]
    fn test_search_zero_minutes_falls_through() {
        let registry = CommandRegistry::new();
        assert!(registry.search("clear 0 mins").is_empty());
    }

    #[test]
    fn test_search_results_have_no_duplicates() {
        let registry = CommandRegistry::new();
        for query in ["c", "clear", "clear 1 hour", "on", "e", "theme d", "clear 3 days"] {
            let results = registry.search(query);
            let unique: HashSet<_> = results.iter().map(|c| c.id.clone()).collect();
            assert_eq!(unique.len(), results.len(), "duplicates for {:?}", query);

            let synthesized = results.iter().filter(|c| matches!(c, Cow::Owned(_))).count();
            assert!(synthesized <= 1);
            for cmd in results.iter().filter(|c| matches!(c, Cow::Borrowed(_))) {
                assert!(registry.get(&cmd.id).is_some());
            }
        }
    }

    #[test]
    fn test_search_mixed_case_trigger() {
        let registry = CommandRegistry::new();
        let results = registry.search("api key filtering");
        assert_eq!(ids(&results), vec!["apikeys-on", "apikeys-off"]);

        let upper = registry.search("API KEY FILTERING OFF");
        assert_eq!(ids(&upper), vec!["apikeys-off"]);
    }

    #[test]
    fn test_rebuild_notifies_subscribers() {
        let mut registry = CommandRegistry::new();
        let mut rx = registry.subscribe();
        assert!(!rx.has_changed().unwrap());

        let before: Vec<_> = registry.commands().to_vec();
        registry.rebuild();

        assert!(rx.has_changed().unwrap());
        let published = rx.borrow_and_update().clone();
        assert_eq!(published.to_vec(), before);
        assert_eq!(registry.commands(), &before[..]);
    }

    #[test]
    fn test_command_categories() {
        let registry = CommandRegistry::new();
        let categories: HashSet<_> = registry.commands().iter().map(|c| c.category).collect();
        for category in CommandCategory::ALL {
            assert!(categories.contains(&category));
        }
    }

    #[test]
    fn test_category_display() {
        assert_eq!(CommandCategory::Clear.display(), "Clear");
        assert_eq!(CommandCategory::Monitoring.display(), "Monitoring");
        assert_eq!(CommandCategory::Settings.display(), "Settings");
        assert_eq!(CommandCategory::Navigation.display(), "Navigation");
        assert_eq!(CommandCategory::Filter.display(), "Filter");
        assert_eq!(CommandCategory::Utility.display(), "Utility");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("sounds"), "Sounds");
        assert_eq!(capitalize("API key filtering"), "API key filtering");
        assert_eq!(capitalize(""), "");
    }
}
