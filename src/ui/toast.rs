// ABOUTME: Transient toast notifications shown by the form host
// ABOUTME: Defines toast kinds, the presenter trait and tracing/recording presenters

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::{error, info, warn};

pub const DEFAULT_TOAST_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    #[serde(alias = "error")]
    Destructive,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Destructive)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

pub trait ToastPresenter: Send + Sync {
    fn present(&self, toast: &Toast);
}

/// Presents toasts as log events; used by the CLI
#[derive(Debug, Default)]
pub struct TracingToastPresenter;

impl ToastPresenter for TracingToastPresenter {
    fn present(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success | ToastKind::Info => info!("{}", toast.message),
            ToastKind::Warning => warn!("{}", toast.message),
            ToastKind::Destructive => error!("{}", toast.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingToastPresenter {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingToastPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ToastPresenter for RecordingToastPresenter {
    fn present(&self, toast: &Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast.clone());
    }
}
