//! Headless picker state: candidates, highlight and visibility

use crate::accents::match_case;

/// Notifications produced by picker state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    VisibilityChanged(bool),
    AccentChosen(String),
}

#[derive(Debug, Default)]
pub struct PickerModel {
    candidates: Vec<String>,
    highlighted: usize,
    visible: bool,
}

impl PickerModel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.candidates.get(self.highlighted).map(String::as_str)
    }

    /// Shows `candidates` for `character`, case-matched, with the first one highlighted.
    /// An already visible picker is hidden first; an empty list leaves it hidden.
    pub fn show(&mut self, character: char, candidates: &[String]) -> Vec<PickerEvent> {
        let mut events: Vec<PickerEvent> = self.hide().into_iter().collect();
        if candidates.is_empty() {
            return events;
        }

        self.candidates = candidates
            .iter()
            .map(|glyph| match_case(character, glyph))
            .collect();
        self.highlighted = 0;
        self.visible = true;
        events.push(PickerEvent::VisibilityChanged(true));
        events
    }

    pub fn hide(&mut self) -> Option<PickerEvent> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        self.candidates.clear();
        self.highlighted = 0;
        Some(PickerEvent::VisibilityChanged(false))
    }

    /// Moves the highlight right, wrapping to the first candidate
    pub fn next(&mut self) -> bool {
        if !self.visible || self.candidates.is_empty() {
            return false;
        }
        self.highlighted = (self.highlighted + 1) % self.candidates.len();
        true
    }

    /// Moves the highlight left, wrapping to the last candidate
    pub fn previous(&mut self) -> bool {
        if !self.visible || self.candidates.is_empty() {
            return false;
        }
        self.highlighted = self
            .highlighted
            .checked_sub(1)
            .unwrap_or(self.candidates.len() - 1);
        true
    }

    /// Chooses the highlighted candidate and hides
    pub fn commit(&mut self) -> Vec<PickerEvent> {
        let Some(chosen) = self.highlighted().map(str::to_string) else {
            return Vec::new();
        };
        let mut events = vec![PickerEvent::AccentChosen(chosen)];
        events.extend(self.hide());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(glyphs: &[&str]) -> Vec<String> {
        glyphs.iter().map(|g| g.to_string()).collect()
    }

    fn shown(glyphs: &[&str]) -> PickerModel {
        let mut model = PickerModel::default();
        model.show('e', &candidates(glyphs));
        model
    }

    #[test]
    fn test_show_highlights_first_candidate() {
        let mut model = PickerModel::default();
        let events = model.show('e', &candidates(&["é", "è"]));

        assert_eq!(events, vec![PickerEvent::VisibilityChanged(true)]);
        assert!(model.is_visible());
        assert_eq!(model.highlighted(), Some("é"));
    }

    #[test]
    fn test_show_while_visible_hides_first() {
        let mut model = shown(&["é"]);
        let events = model.show('a', &candidates(&["à", "â"]));

        assert_eq!(
            events,
            vec![
                PickerEvent::VisibilityChanged(false),
                PickerEvent::VisibilityChanged(true)
            ]
        );
        assert_eq!(model.candidates(), ["à", "â"]);
    }

    #[test]
    fn test_show_empty_list_stays_hidden() {
        let mut model = PickerModel::default();
        assert!(model.show('q', &[]).is_empty());
        assert!(!model.is_visible());
        assert!(model.commit().is_empty());
    }

    #[test]
    fn test_upper_case_base_shows_upper_case_candidates() {
        let mut model = PickerModel::default();
        model.show('E', &candidates(&["é", "€"]));
        assert_eq!(model.candidates(), ["É", "€"]);
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let mut model = shown(&["é", "è", "ê"]);

        assert!(model.previous());
        assert_eq!(model.highlighted(), Some("ê"));
        assert!(model.next());
        assert_eq!(model.highlighted(), Some("é"));
        model.next();
        model.next();
        assert_eq!(model.highlighted_index(), 2);
        model.next();
        assert_eq!(model.highlighted_index(), 0);
    }

    #[test]
    fn test_navigation_ignored_while_hidden() {
        let mut model = PickerModel::default();
        assert!(!model.next());
        assert!(!model.previous());
    }

    #[test]
    fn test_commit_emits_choice_then_hides() {
        let mut model = shown(&["é", "è", "ê", "ë", "€"]);
        model.next();
        model.next();
        model.next();

        assert_eq!(
            model.commit(),
            vec![
                PickerEvent::AccentChosen("ë".to_string()),
                PickerEvent::VisibilityChanged(false)
            ]
        );
        assert!(!model.is_visible());
        assert!(model.commit().is_empty());
    }

    #[test]
    fn test_hide_only_notifies_when_visible() {
        let mut model = shown(&["é"]);
        assert_eq!(model.hide(), Some(PickerEvent::VisibilityChanged(false)));
        assert_eq!(model.hide(), None);
    }
}
