//! # Navigation State Sync
//!
//! Keeps the list filters in step with the app location and carries the list
//! scroll position across a list → detail → back cycle.
//!
//! ```text
//! atlas:///?region=Asia&s=Japan,France      list view
//! atlas:///detail?name=Japan                detail view
//! ```
//!
//! Filter edits *replace* the current history entry, so Back never walks
//! through every keystroke. Opening a detail view *pushes* a new entry.
//! Going back re-mounts the list from its location, which restores the
//! filters for free; the scroll offset comes back from [`Storage`].

use log::{debug, info, warn};
use reqwest::Url;

use crate::core::country::{Dataset, GLOBAL_REGION_ID, RegionOption, SearchOption};
use crate::core::storage::Storage;

/// Query parameter holding the comma-separated name selection.
pub const SEARCH_PARAM: &str = "s";
/// Query parameter holding the region id.
pub const REGION_PARAM: &str = "region";
/// Query parameter holding the country name on the detail route.
pub const NAME_PARAM: &str = "name";
/// Storage key of the last list scroll offset.
pub const SCROLL_POSITION_KEY: &str = "scrollposition";

const APP_ROOT: &str = "atlas:///";
const DETAIL_PATH: &str = "/detail";

/// Filter selection of the list view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: Vec<SearchOption>,
    pub current_region: RegionOption,
}

impl FilterState {
    /// Read the filters from a location. Missing or empty parameters fall
    /// back to no search and the Global region.
    pub fn from_url(url: &Url) -> Self {
        let search: Vec<SearchOption> = query_param(url, SEARCH_PARAM)
            .map(|s| {
                s.split(',')
                    .filter(|token| !token.is_empty())
                    .map(|token| SearchOption::new(token, ""))
                    .collect()
            })
            .unwrap_or_default();

        let current_region = match query_param(url, REGION_PARAM) {
            Some(region) if !region.is_empty() && region != GLOBAL_REGION_ID => {
                RegionOption::named(region)
            }
            _ => RegionOption::global(),
        };

        Self {
            search,
            current_region,
        }
    }
}

/// Which view a location points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(String),
}

impl Route {
    /// Unknown paths, and a detail path without a name, resolve to the list.
    pub fn from_url(url: &Url) -> Self {
        if url.path() == DETAIL_PATH
            && let Some(name) = query_param(url, NAME_PARAM)
            && !name.is_empty()
        {
            return Route::Detail(name);
        }
        Route::List
    }
}

/// The root list location with no filters.
pub fn root_url() -> Url {
    Url::parse(APP_ROOT).expect("app root is a valid URL")
}

/// A list location carrying the given raw `s` and `region` values.
pub fn list_url(search: Option<&str>, region: Option<&str>) -> Url {
    let mut url = root_url();
    set_query_param(&mut url, SEARCH_PARAM, search.filter(|s| !s.is_empty()));
    if let Some(region) = region {
        set_query_param(&mut url, REGION_PARAM, Some(region));
    }
    url
}

/// Location of the detail view for `name`.
pub fn detail_url(name: &str) -> Url {
    let mut url = root_url();
    url.set_path(DETAIL_PATH);
    url.query_pairs_mut().append_pair(NAME_PARAM, name);
    url
}

/// Session history the sync writes filter edits into.
pub trait History {
    fn location(&self) -> &Url;

    /// Swap the current entry without adding a new one.
    fn replace(&mut self, url: Url);
}

/// Back-stack of locations.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Url>,
    index: usize,
}

// Never empty: there is always a current entry.
#[allow(clippy::len_without_is_empty)]
impl MemoryHistory {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// Add an entry after the current one, dropping any forward entries.
    pub fn push(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry. Returns `None` at the first entry.
    pub fn back(&mut self) -> Option<&Url> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Url {
        &self.entries[self.index]
    }

    fn replace(&mut self, url: Url) {
        self.entries[self.index] = url;
    }
}

/// A scrollable surface with a vertical offset.
pub trait Viewport {
    fn scroll_y(&self) -> u16;
    fn scroll_to(&mut self, y: u16);
}

/// Filter state plus the scroll-restore guard for one mount of the list view.
#[derive(Debug, Clone, Default)]
pub struct NavigationSync {
    pub filter: FilterState,
    restored: bool,
}

impl NavigationSync {
    /// Mount the list view at `url`.
    pub fn init_from_url(url: &Url) -> Self {
        let filter = FilterState::from_url(url);
        debug!(
            "List mounted: search={}, region={}",
            filter.search.len(),
            filter.current_region.id
        );
        Self {
            filter,
            restored: false,
        }
    }

    /// Replace the name selection and mirror it into `s`. An empty selection
    /// removes the parameter.
    pub fn on_search_change(&mut self, history: &mut dyn History, selection: Vec<SearchOption>) {
        let joined = selection
            .iter()
            .map(|option| option.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.filter.search = selection;

        let mut url = history.location().clone();
        set_query_param(&mut url, SEARCH_PARAM, Some(joined.as_str()).filter(|s| !s.is_empty()));
        history.replace(url);
    }

    /// Replace the region (Global when `None`) and mirror it into `region`.
    /// The Global region is written as an empty value.
    pub fn on_region_change(&mut self, history: &mut dyn History, region: Option<RegionOption>) {
        let region = region.unwrap_or_default();
        let value = if region.is_global() {
            String::new()
        } else {
            region.id.clone()
        };
        self.filter.current_region = region;

        let mut url = history.location().clone();
        set_query_param(&mut url, REGION_PARAM, Some(value.as_str()));
        history.replace(url);
    }

    /// Record the current offset before leaving the list. Storage failures
    /// are logged and otherwise ignored.
    pub fn persist_scroll_offset(viewport: &dyn Viewport, storage: &mut dyn Storage) {
        let offset = viewport.scroll_y();
        if let Err(e) = storage.set_item(SCROLL_POSITION_KEY, &offset.to_string()) {
            warn!("Failed to persist scroll offset {}: {}", offset, e);
        }
    }

    /// Scroll back to the stored offset once the dataset has loaded. Runs at
    /// most once per mount; returns true if it scrolled.
    pub fn restore_scroll_offset(
        &mut self,
        dataset: &Dataset,
        storage: &dyn Storage,
        viewport: &mut dyn Viewport,
    ) -> bool {
        if self.restored || !dataset.is_loaded() {
            return false;
        }
        self.restored = true;

        let offset = storage
            .get_item(SCROLL_POSITION_KEY)
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(0);
        if offset == 0 {
            return false;
        }
        info!("Restoring list scroll offset {}", offset);
        viewport.scroll_to(offset);
        true
    }

    #[cfg(test)]
    fn has_restored(&self) -> bool {
        self.restored
    }
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Set `key` to `value`, or remove it when `value` is `None`. Other
/// parameters keep their order.
fn set_query_param(url: &mut Url, key: &str, value: Option<&str>) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;
    use crate::test_support::{FakeViewport, japan};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_init_from_url_round_trip() {
        let location = list_url(Some("Japan,France"), Some("Asia"));
        let mut history = MemoryHistory::new(location.clone());
        let mut nav = NavigationSync::init_from_url(&location);

        assert_eq!(
            nav.filter.search,
            vec![SearchOption::new("Japan", ""), SearchOption::new("France", "")]
        );
        assert_eq!(nav.filter.current_region, RegionOption::named("Asia"));

        let search = nav.filter.search.clone();
        nav.on_search_change(&mut history, search);
        assert_eq!(
            query_param(history.location(), SEARCH_PARAM).as_deref(),
            Some("Japan,France")
        );
        assert_eq!(
            query_param(history.location(), REGION_PARAM).as_deref(),
            Some("Asia")
        );
    }

    #[test]
    fn test_init_from_url_defaults() {
        let nav = NavigationSync::init_from_url(&root_url());
        assert!(nav.filter.search.is_empty());
        assert!(nav.filter.current_region.is_global());
        assert!(!nav.has_restored());
    }

    #[test]
    fn test_init_from_url_drops_empty_segments() {
        let nav = NavigationSync::init_from_url(&url("atlas:///?s=,Japan,,France,&region="));
        let names: Vec<&str> = nav.filter.search.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Japan", "France"]);
        assert!(nav.filter.current_region.is_global());
    }

    #[test]
    fn test_init_from_url_tolerates_stray_characters() {
        let nav = NavigationSync::init_from_url(&url("atlas:///?s=%ZZ&region=%&x=1"));
        assert_eq!(nav.filter.search, vec![SearchOption::new("%ZZ", "")]);
        assert_eq!(nav.filter.current_region.id, "%");
    }

    #[test]
    fn test_empty_search_removes_param() {
        let mut history = MemoryHistory::new(url("atlas:///?s=Japan&region=Asia"));
        let mut nav = NavigationSync::init_from_url(history.location());
        nav.on_search_change(&mut history, Vec::new());
        assert!(nav.filter.search.is_empty());
        assert_eq!(query_param(history.location(), SEARCH_PARAM), None);
        assert_eq!(
            query_param(history.location(), REGION_PARAM).as_deref(),
            Some("Asia")
        );
    }

    #[test]
    fn test_search_change_replaces_history_entry() {
        let mut history = MemoryHistory::new(root_url());
        let mut nav = NavigationSync::init_from_url(history.location());
        nav.on_search_change(&mut history, vec![SearchOption::new("Japan", "Asia")]);
        nav.on_search_change(
            &mut history,
            vec![
                SearchOption::new("Japan", "Asia"),
                SearchOption::new("Côte d'Ivoire", "Africa"),
            ],
        );
        assert_eq!(history.len(), 1);
        let reparsed = FilterState::from_url(history.location());
        assert_eq!(reparsed.search[1].name, "Côte d'Ivoire");
    }

    #[test]
    fn test_region_change_writes_id() {
        let mut history = MemoryHistory::new(root_url());
        let mut nav = NavigationSync::init_from_url(history.location());
        nav.on_region_change(&mut history, Some(RegionOption::named("Europe")));
        assert_eq!(nav.filter.current_region.id, "Europe");
        assert_eq!(
            query_param(history.location(), REGION_PARAM).as_deref(),
            Some("Europe")
        );
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_region_change_to_none_falls_back_to_global() {
        let mut history = MemoryHistory::new(url("atlas:///?region=Asia"));
        let mut nav = NavigationSync::init_from_url(history.location());
        nav.on_region_change(&mut history, None);
        assert!(nav.filter.current_region.is_global());
        assert_eq!(
            query_param(history.location(), REGION_PARAM).as_deref(),
            Some("")
        );
        assert!(FilterState::from_url(history.location()).current_region.is_global());
    }

    #[test]
    fn test_region_change_keeps_stale_search() {
        let mut history = MemoryHistory::new(url("atlas:///?s=France"));
        let mut nav = NavigationSync::init_from_url(history.location());
        nav.on_region_change(&mut history, Some(RegionOption::named("Asia")));
        assert_eq!(nav.filter.search, vec![SearchOption::new("France", "")]);
    }

    #[test]
    fn test_unrelated_params_survive() {
        let mut history = MemoryHistory::new(url("atlas:///?utm=x&s=Japan"));
        let mut nav = NavigationSync::init_from_url(history.location());
        nav.on_search_change(&mut history, Vec::new());
        assert_eq!(query_param(history.location(), "utm").as_deref(), Some("x"));
    }

    #[test]
    fn test_routes() {
        assert_eq!(Route::from_url(&root_url()), Route::List);
        assert_eq!(
            Route::from_url(&detail_url("Saint Kitts and Nevis")),
            Route::Detail("Saint Kitts and Nevis".to_string())
        );
        assert_eq!(Route::from_url(&url("atlas:///detail")), Route::List);
        assert_eq!(Route::from_url(&url("atlas:///elsewhere")), Route::List);
    }

    #[test]
    fn test_history_push_and_back() {
        let list = list_url(Some("Japan"), None);
        let mut history = MemoryHistory::new(list.clone());
        history.push(detail_url("Japan"));
        history.push(detail_url("China"));
        assert_eq!(history.len(), 3);
        assert_eq!(Route::from_url(history.back().unwrap()), Route::Detail("Japan".into()));
        assert_eq!(history.back(), Some(&list));
        assert_eq!(history.back(), None);

        history.push(detail_url("France"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_persist_scroll_offset_overwrites() {
        let mut storage = MemoryStorage::new();
        NavigationSync::persist_scroll_offset(&FakeViewport::at(12), &mut storage);
        NavigationSync::persist_scroll_offset(&FakeViewport::at(30), &mut storage);
        assert_eq!(storage.get_item(SCROLL_POSITION_KEY).as_deref(), Some("30"));
    }

    #[test]
    fn test_restore_scrolls_once_per_mount() {
        let mut storage = MemoryStorage::new();
        storage.set_item(SCROLL_POSITION_KEY, "25").unwrap();
        let dataset = Dataset::Loaded(vec![japan()]);
        let mut viewport = FakeViewport::default();
        let mut nav = NavigationSync::init_from_url(&root_url());

        assert!(nav.restore_scroll_offset(&dataset, &storage, &mut viewport));
        assert_eq!(viewport.scrolls, vec![25]);

        assert!(!nav.restore_scroll_offset(&dataset, &storage, &mut viewport));
        assert_eq!(viewport.scrolls, vec![25]);
    }

    #[test]
    fn test_restore_waits_for_dataset() {
        let mut storage = MemoryStorage::new();
        storage.set_item(SCROLL_POSITION_KEY, "25").unwrap();
        let mut viewport = FakeViewport::default();
        let mut nav = NavigationSync::init_from_url(&root_url());

        assert!(!nav.restore_scroll_offset(&Dataset::default(), &storage, &mut viewport));
        assert!(!nav.has_restored());
        assert!(viewport.scrolls.is_empty());

        let loaded = Dataset::Loaded(vec![japan()]);
        assert!(nav.restore_scroll_offset(&loaded, &storage, &mut viewport));
        assert_eq!(viewport.scrolls, vec![25]);
    }

    #[test]
    fn test_restore_noop_for_zero_missing_or_garbage() {
        let dataset = Dataset::Loaded(vec![japan()]);
        for stored in [Some("0"), None, Some("abc"), Some("-5")] {
            let mut storage = MemoryStorage::new();
            if let Some(value) = stored {
                storage.set_item(SCROLL_POSITION_KEY, value).unwrap();
            }
            let mut viewport = FakeViewport::default();
            let mut nav = NavigationSync::init_from_url(&root_url());
            assert!(!nav.restore_scroll_offset(&dataset, &storage, &mut viewport));
            assert!(viewport.scrolls.is_empty(), "stored {:?}", stored);
            assert!(nav.has_restored());
        }
    }
}
