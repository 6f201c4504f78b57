//! # Tab Cycles
//!
//! A planner tab can point at several pages, e.g. a "Q1" tab cycling through
//! January, February and March. Tapping it from anywhere enters the cycle at
//! its first member; tapping it again while on a member advances to the next
//! one, wrapping after the last.
//!
//! Nothing is stored between renders. Which page the tab links to, and
//! whether it is drawn as active, is recomputed from the page being rendered.

/// Where a tab links to and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTarget<'a> {
    pub target: &'a str,
    pub active: bool,
}

/// Resolve a tab with `destinations` rendered on `current_page`.
///
/// `forced_highlight` stands in for the current page when rendering off a
/// real page (previews). The current page wins when both are given and it
/// is a member of the cycle. Returns `None` for an empty destination list.
pub fn resolve_tab<'a, S>(
    destinations: &'a [S],
    current_page: Option<&str>,
    forced_highlight: Option<&str>,
) -> Option<TabTarget<'a>>
where
    S: AsRef<str>,
{
    let first = destinations.first()?.as_ref();

    if destinations.len() == 1 {
        let active = current_page == Some(first) || forced_highlight == Some(first);
        return Some(TabTarget {
            target: first,
            active,
        });
    }

    let position = |id: Option<&str>| id.and_then(|id| destinations.iter().position(|d| d.as_ref() == id));
    match position(current_page).or_else(|| position(forced_highlight)) {
        Some(i) => Some(TabTarget {
            target: destinations[(i + 1) % destinations.len()].as_ref(),
            active: true,
        }),
        None => Some(TabTarget {
            target: first,
            active: false,
        }),
    }
}
