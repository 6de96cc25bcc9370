// src/session.rs
//
// One dashboard session: endpoint config, the HTTP client behind its
// seam, the fetch cache, and the user's current date range and
// selections. Everything a shell needs lives here; nothing is global.

use std::collections::HashMap;
use std::io;

use crate::core::net::{HttpClient, UreqClient};
use crate::data::{RecordTable, TableView};
use crate::export;
use crate::fetch::{fetch_records, FetchKey, FetchOptions};
use crate::filter::{apply_filter, apply_filters, filter_by_date, DateRange, Selections};
use crate::params::{API_TOKEN, API_URL, FILTER_FIELDS};

/// Where the session reads from and what it authenticates with.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub endpoint: String,
    pub token: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            endpoint: s!(API_URL),
            token: s!(API_TOKEN),
        }
    }
}

/// Outcome of the most recent load, for the shell to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loaded { rows: usize },
    /// The fetch worked but carried no usable submissions.
    Empty,
    /// The fetch failed; the session continues with an empty table.
    Failed { reason: String },
}

pub struct Session {
    config: ApiConfig,
    options: FetchOptions,
    client: Box<dyn HttpClient>,
    cache: HashMap<FetchKey, RecordTable>,
    /// Fallback table handed out before any load and after misses.
    empty: RecordTable,
    status: LoadStatus,
    pub date_range: DateRange,
    pub selections: Selections,
}

impl Session {
    pub fn new(config: ApiConfig, options: FetchOptions) -> Self {
        let client = Box::new(UreqClient::new(options.timeout));
        Self::with_client(config, options, client)
    }

    /// Same session, caller-supplied transport. This is the test seam.
    pub fn with_client(
        config: ApiConfig,
        options: FetchOptions,
        client: Box<dyn HttpClient>,
    ) -> Self {
        Session {
            config,
            options,
            client,
            cache: HashMap::new(),
            empty: RecordTable::default(),
            status: LoadStatus::NotLoaded,
            date_range: DateRange::default(),
            selections: Selections::default(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Point the session at a different endpoint or credential. Tables
    /// already fetched stay cached under their own keys, so switching
    /// back is instant.
    pub fn set_config(&mut self, config: ApiConfig) {
        self.config = config;
        self.status = LoadStatus::NotLoaded;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn key(&self) -> FetchKey {
        FetchKey::new(&self.config.endpoint, &self.config.token)
    }

    /// Fetch the submissions for the current config, once. Later calls
    /// with the same endpoint and token reuse the cached table, failed
    /// loads included; the failure text is only reported the first
    /// time, after which the cached empty table reads as Empty.
    pub fn load(&mut self) -> &LoadStatus {
        let key = self.key();
        if let Some(table) = self.cache.get(&key) {
            log::debug!("cache hit for {}", self.config.endpoint);
            self.status = if table.is_empty() {
                LoadStatus::Empty
            } else {
                LoadStatus::Loaded { rows: table.len() }
            };
            return &self.status;
        }

        match fetch_records(
            self.client.as_ref(),
            &self.config.endpoint,
            &self.config.token,
            &self.options,
        ) {
            Ok(table) => {
                self.status = if table.is_empty() {
                    log::warn!("no submissions in response");
                    LoadStatus::Empty
                } else {
                    LoadStatus::Loaded { rows: table.len() }
                };
                self.cache.insert(key, table);
            }
            Err(err) => {
                log::error!("fetch failed: {err}");
                self.status = LoadStatus::Failed { reason: err.to_string() };
                self.cache.insert(key, RecordTable::default());
            }
        }
        &self.status
    }

    /// Drop the cached table for the current config so the next load
    /// hits the network again.
    pub fn invalidate(&mut self) {
        let key = self.key();
        self.cache.remove(&key);
        self.status = LoadStatus::NotLoaded;
    }

    /// The loaded table, or an empty one before any successful load.
    pub fn table(&self) -> &RecordTable {
        self.cache.get(&self.key()).unwrap_or(&self.empty)
    }

    /// The table narrowed by the date range and every active filter.
    pub fn filtered(&self) -> TableView<'_> {
        let table = self.table();
        let view = filter_by_date(table.view(), &self.date_range);
        let view = apply_filters(view, &self.selections);
        log::debug!("filter chain kept {} of {} rows", view.len(), table.len());
        view
    }

    /// Options for one filter widget. Each field sees the date-filtered
    /// rows narrowed by the selections on the fields before it, so the
    /// lists tighten as the user works down the chain.
    pub fn filter_options(&self, field: &str) -> Vec<String> {
        let mut view = filter_by_date(self.table().view(), &self.date_range);
        for ff in FILTER_FIELDS {
            if ff.field == field {
                break;
            }
            view = apply_filter(view, ff.field, &self.selections);
        }
        crate::filter::filter_options(&view, field)
    }

    /// The filtered rows as a ready-to-download workbook.
    pub fn export_xlsx(&self) -> io::Result<Vec<u8>> {
        export::encode(&self.filtered())
    }
}
