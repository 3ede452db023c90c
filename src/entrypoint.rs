use std::collections::HashMap;

use convert_case::{Case, Casing};
use once_cell::sync::Lazy;

use crate::manifest::COMPONENT_EXT;

/// Hand-maintained entry-points for multi-export components where the
/// generic single-re-export derivation is wrong. Consulted before the
/// generic strategy.
static INDEX_OVERRIDES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "wheel-picker",
            "export { default as WheelPicker } from './WheelPicker.vue'\n\
             export { default as WheelPickerWrapper } from './WheelPickerWrapper.vue'\n\
             export type { WheelPickerOption } from './WheelPicker.vue'\n",
        ),
        (
            "bar-visualizer",
            "export { default as BarVisualizer } from './BarVisualizer.vue'\n\
             export type { AgentState } from './BarVisualizer.vue'\n",
        ),
        (
            "animated-tabs",
            "export { default as AnimatedTabs } from './AnimatedTabs.vue'\n\
             export type { TabItem } from './AnimatedTabs.vue'\n",
        ),
    ])
});

/// Synthesize `index.ts` content for a component without one.
///
/// `files` is the resolved file-name set (declared or discovered), not the
/// subset that was actually readable, so a declared-but-missing main file
/// still wins the re-export target.
pub fn synthesize_index(name: &str, files: &[String]) -> String {
    if let Some(content) = INDEX_OVERRIDES.get(name) {
        return (*content).to_string();
    }

    let pascal = name.to_case(Case::Pascal);
    let exact = format!("{pascal}.{COMPONENT_EXT}");
    let suffix = format!(".{COMPONENT_EXT}");
    let main_file = files
        .iter()
        .find(|file| **file == exact)
        .or_else(|| files.iter().find(|file| file.ends_with(&suffix)));

    match main_file {
        Some(file) => format!("export {{ default as {pascal} }} from './{file}'\n"),
        None => format!("// Warning: Could not auto-generate export for {name}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn prefers_exact_pascal_match() {
        let files = names(&["Helper.vue", "GlowCard.vue"]);
        assert_eq!(
            synthesize_index("glow-card", &files),
            "export { default as GlowCard } from './GlowCard.vue'\n"
        );
    }

    #[test]
    fn falls_back_to_first_vue_file() {
        let files = names(&["notes.md", "Inner.vue"]);
        assert_eq!(
            synthesize_index("glow-card", &files),
            "export { default as GlowCard } from './Inner.vue'\n"
        );
    }

    #[test]
    fn handles_underscore_names() {
        let files = names(&["GlowCard.vue"]);
        assert_eq!(
            synthesize_index("glow_card", &files),
            "export { default as GlowCard } from './GlowCard.vue'\n"
        );
    }

    #[test]
    fn emits_placeholder_without_vue_files() {
        let files = names(&["styles.css"]);
        assert_eq!(
            synthesize_index("glow-card", &files),
            "// Warning: Could not auto-generate export for glow-card\n"
        );
    }

    #[test]
    fn override_wins_over_derivation() {
        let files = names(&["WheelPicker.vue", "WheelPickerWrapper.vue"]);
        let index = synthesize_index("wheel-picker", &files);
        assert!(index.contains("WheelPickerWrapper"));
        assert!(index.contains("export type { WheelPickerOption }"));
    }

    #[test]
    fn override_applies_even_with_empty_file_set() {
        let index = synthesize_index("animated-tabs", &[]);
        assert_eq!(
            index,
            "export { default as AnimatedTabs } from './AnimatedTabs.vue'\n\
             export type { TabItem } from './AnimatedTabs.vue'\n"
        );
    }
}
