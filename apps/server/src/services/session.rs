// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The one document this server edits, and exclusive access to it.
//!
//! The view-range command assumes nobody else touches the model while it
//! runs. Access goes through `try_lock`: a request that finds the document in
//! use is turned away with [`ApiError::Busy`] instead of queueing.

use std::sync::{Mutex, MutexGuard, TryLockError};

use anyhow::Context;
use viewrange_core::HostContext;
use viewrange_document::Document;
use viewrange_processing::{CommandResponse, Controller, Settings, ViewRangeRequest};

use crate::config::Config;
use crate::error::ApiError;

/// Model served when no `MODEL_PATH` is configured.
pub const DEMO_MODEL: &str = include_str!("../../models/demo.json");

pub struct Session {
    document: Mutex<Document>,
    controller: Controller,
}

impl Session {
    pub fn new(document: Document, settings: Settings) -> Self {
        Self {
            document: Mutex::new(document),
            controller: Controller::new(settings),
        }
    }

    /// Loads the configured model, or the demo model.
    pub fn load(config: &Config) -> anyhow::Result<Self> {
        let document = match &config.model_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read model {}", path.display()))?;
                Document::from_json(&json)
                    .with_context(|| format!("failed to load model {}", path.display()))?
            }
            None => Document::from_json(DEMO_MODEL).context("failed to load demo model")?,
        };

        tracing::info!(
            levels = document.level_count(),
            views = document.view_count(),
            shapes = document.shape_count(),
            "model loaded"
        );

        let settings = Settings::default().with_movement_epsilon(config.movement_epsilon);
        Ok(Self::new(document, settings))
    }

    /// Exclusive access to the document, or [`ApiError::Busy`].
    pub fn try_document(&self) -> Result<MutexGuard<'_, Document>, ApiError> {
        match self.document.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => Err(ApiError::Busy),
            Err(TryLockError::Poisoned(poisoned)) => {
                // The controller rolls back its own work, so the state is usable.
                tracing::warn!("recovering document lock after a panic");
                Ok(poisoned.into_inner())
            }
        }
    }

    pub fn with_document<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T, ApiError> {
        let mut document = self.try_document()?;
        Ok(f(&mut document))
    }

    /// Runs one view-range command against the document.
    pub fn execute(&self, request: &ViewRangeRequest) -> Result<CommandResponse, ApiError> {
        self.with_document(|document| {
            let active_view = document.active_view();
            self.controller
                .execute(HostContext::new(document, active_view), request)
        })
    }
}
