// ABOUTME: Collaborator interfaces consumed by an interactive form host
// ABOUTME: Toast notifications and the persisted sidebar visibility preference

pub mod error;
pub mod sidebar;
pub mod toast;

pub use error::PreferenceError;
pub use sidebar::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, SidebarState, MOBILE_BREAKPOINT,
    SIDEBAR_STORAGE_KEY,
};
pub use toast::{RecordingToastPresenter, Toast, ToastKind, ToastPresenter, TracingToastPresenter};
