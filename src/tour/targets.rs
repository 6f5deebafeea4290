//! Target identifiers of the host UI elements the walkthrough highlights.
//!
//! The engine depends only on lookup by identifier; any host exposing
//! elements under these names is compatible.

/// The study search box input.
pub const STUDY_SEARCH_BOX: &str = "cancer-study-search-box-input";

/// Container of the cancer study list.
pub const STUDY_LIST: &str = "cancer-study-list-container";

/// The "Explore Selected Studies" trigger.
pub const EXPLORE_BUTTON: &str = "explore-studies-button";

/// The "+" icon expanding the study description.
pub const SHOW_MORE_DESCRIPTION: &str = "show-more-description-icon";

/// The mutated genes table on the study summary page.
pub const MUTATED_GENES_TABLE: &str = "mutated-genes-table";

/// The bookmark action that opens the virtual study dialog.
pub const BOOKMARK_ACTION: &str = "action-button-bookmark";

/// The virtual study summary panel.
pub const SUMMARY_PANEL: &str = "virtual-study-summary-panel";

/// The share button inside the summary panel.
pub const SHARE_BUTTON: &str = "virtual-study-summary-share-btn";

/// The save button inside the summary panel.
pub const SAVE_BUTTON: &str = "virtual-study-summary-save-btn";
