use crate::point::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry {
    pub name: String,
    pub coordinates: String,
    pub highlighted: bool,
}

/// The point list shown next to the map.
#[derive(Debug, Default)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
    scrolled_to: Option<String>,
}

impl Sidebar {
    /// Rebuilds the list from `points`, keeping the highlight of points still present.
    pub fn update(&mut self, points: &[Point]) {
        let highlighted = self.highlighted().map(str::to_owned);

        self.entries = points
            .iter()
            .map(|point| SidebarEntry {
                name: point.name.clone(),
                coordinates: point.display_coordinates(),
                highlighted: highlighted.as_deref() == Some(point.name.as_str()),
            })
            .collect();
    }

    pub fn clear_highlights(&mut self) {
        for entry in &mut self.entries {
            entry.highlighted = false;
        }
    }

    /// Highlights the entry and scrolls it into view. Returns false when no entry has that name.
    pub fn highlight(&mut self, name: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.highlighted = true;
                self.scrolled_to = Some(name.to_owned());
                true
            }
            None => false,
        }
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.highlighted)
            .map(|entry| entry.name.as_str())
    }

    pub fn scrolled_to(&self) -> Option<&str> {
        self.scrolled_to.as_deref()
    }

    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
