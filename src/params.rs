// src/params.rs
//
// Fixed parameters of the pipeline: where the submissions live, which
// column carries the submission time, which fields are filterable, and
// the retry schedule for the one remote read.

use std::time::Duration;

/// Submissions endpoint (JSON listing for one form).
pub const API_URL: &str =
    "https://kf.kobotoolbox.org/api/v2/assets/a5L2YdhgWi4PMxDNYNPzPD/data/?format=json";

/// Static bearer credential; sent as `Authorization: Token <token>`.
pub const API_TOKEN: &str = "c700251b23afcdc188fcd30c68274996797149fd";

pub const USER_AGENT: &str = concat!("kobo_dash/", env!("CARGO_PKG_VERSION"));

/// Flattened column holding the submission timestamp.
pub const SUBMISSION_TIME_FIELD: &str = "_submission_time";

/// Whole-request deadline for one GET attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Statuses worth retrying; everything else is terminal on first sight.
pub const RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Sleep before each retry. Three entries → at most four attempts total.
pub const RETRY_BACKOFF: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(4),
];

/// Default date window offered by the shell, as (year, month, day).
pub const DEFAULT_START_YMD: (i32, u32, u32) = (2024, 1, 1);
pub const DEFAULT_END_YMD: (i32, u32, u32) = (2024, 12, 31);

/// One filterable field: the flattened column it reads and the label the
/// shell shows for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterField {
    pub field: &'static str,
    pub label: &'static str,
}

/// The categorical filters, in the order they are applied and displayed.
/// Entries whose field is absent from a given table are skipped.
pub const FILTER_FIELDS: &[FilterField] = &[
    FilterField { field: "Identification/Province", label: "Province" },
    FilterField { field: "Identification/Commune", label: "Commune" },
    FilterField { field: "Identification/Adresse_PDV", label: "Adresse PDV" },
    FilterField { field: "Nom", label: "Agent" },
    FilterField { field: "commandes_credits", label: "Commandes Credits" },
];
