//! Application constants for the claim validator
//!
//! This module contains the record tags, delimiters, field names, default
//! tolerances and the representative allowed-value sets used throughout the
//! validator. The allowed-value sets are only defaults: `config::AllowedValues`
//! can extend or replace them.

// =============================================================================
// File Format
// =============================================================================

/// Primary field delimiter
pub const FIELD_DELIMITER: u8 = b'\t';

/// Secondary delimiter for list-valued fields
pub const LIST_DELIMITER: char = '|';

/// Escape character inside free-text fields
pub const ESCAPE_CHAR: char = '\\';

/// Escape runs must come in multiples of this length
pub const ESCAPE_RUN_MULTIPLE: usize = 4;

/// Comment marker (after optional leading whitespace)
pub const COMMENT_MARKER: char = '#';

// =============================================================================
// Record Tags
// =============================================================================

/// Accepted record type tags, canonical spelling first
pub mod tags {
    pub const HEADER: &[&str] = &["HEAD", "HEAD01"];
    pub const SUMMARY: &[&str] = &["SY02", "SY02.01"];
    pub const DETAIL: &[&str] = &["CD01", "CD01.01"];
    pub const FOOTER: &[&str] = &["FOOT"];

    /// Release/resource blocks share this prefix and are counted, not validated
    pub const IGNORED_PREFIX: &str = "RE0";

    /// Label used for findings that are not tied to a record
    pub const FILE: &str = "FILE";
}

// =============================================================================
// Tolerances and Processing Defaults
// =============================================================================

/// Absolute tolerance for amount comparisons, as a decimal string
pub const DEFAULT_AMOUNT_TOLERANCE: &str = "0.02";

/// Absolute tolerance for percentage share comparisons
pub const DEFAULT_SHARE_TOLERANCE: &str = "0.01";

/// Emit a progress update every N records
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Bytes sampled from the head of the source to estimate its line count
pub const DEFAULT_ESTIMATE_SAMPLE_BYTES: usize = 64 * 1024;

/// Config file name looked up under the user config directory
pub const CONFIG_DIR_NAME: &str = "claim-validator";
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// Identifier Patterns
// =============================================================================

pub mod patterns {
    /// DDEX party identifier
    pub const DPID: &str = r"^PADPIDA[A-Z0-9]{11}$";

    /// `namespace::value` party reference
    pub const NAMESPACED_PARTY_ID: &str = r"^[A-Za-z0-9_.\-]+::[^\s:][^\s]*$";

    /// International Standard Name Identifier
    pub const ISNI: &str = r"^[0-9]{15}[0-9X]$";

    /// International Standard Recording Code
    pub const ISRC: &str = r"^[A-Z]{2}[A-Z0-9]{3}[0-9]{7}$";

    /// International Standard Musical Work Code, compact or formatted
    pub const ISWC: &str = r"^T(?:[0-9]{10}|-[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9])$";
}

// =============================================================================
// Allowed Value Defaults
// =============================================================================

pub mod allowed {
    pub const PROFILES: &[&str] = &["BasicProfile", "AudioVisualProfile", "UgcProfile"];

    pub const COMMERCIAL_MODELS: &[&str] = &[
        "SubscriptionModel",
        "AdvertisementSupportedModel",
        "PayAsYouGoModel",
        "FreeOfChargeModel",
        "RightsClaimModel",
        "BundledModel",
    ];

    pub const USE_TYPES: &[&str] = &[
        "Stream",
        "OnDemandStream",
        "NonInteractiveStream",
        "PermanentDownload",
        "ConditionalDownload",
        "TetheredDownload",
        "UserMakeAvailableUserProvided",
        "Webcast",
    ];

    pub const CLAIM_BASES: &[&str] = &["Owned", "Controlled", "Administered", "Licensed"];

    pub const TERRITORIES: &[&str] = &[
        "Worldwide", "AT", "AU", "BE", "BR", "CA", "CH", "DE", "DK", "ES", "FI", "FR", "GB",
        "IE", "IT", "JP", "MX", "NL", "NO", "NZ", "PL", "PT", "SE", "US",
    ];

    pub const CURRENCIES: &[&str] = &[
        "AUD", "BRL", "CAD", "CHF", "DKK", "EUR", "GBP", "JPY", "MXN", "NOK", "NZD", "PLN",
        "SEK", "USD",
    ];
}

// =============================================================================
// Field Names
// =============================================================================

/// Field names as they appear in findings
pub mod fields {
    pub const RECORD_TYPE: &str = "RecordType";
    pub const LINE: &str = "Line";
    pub const PATH: &str = "Path";

    // Header
    pub const MESSAGE_VERSION: &str = "MessageVersion";
    pub const PROFILE: &str = "Profile";
    pub const MESSAGE_ID: &str = "MessageId";
    pub const MESSAGE_CREATED: &str = "MessageCreatedDateTime";
    pub const SENDER_PARTY_ID: &str = "SenderPartyId";
    pub const SENDER_NAME: &str = "SenderName";
    pub const RECIPIENT_PARTY_ID: &str = "RecipientPartyId";
    pub const RECIPIENT_NAME: &str = "RecipientName";
    pub const ON_BEHALF_OF_PARTY_ID: &str = "SentOnBehalfOfPartyId";
    pub const ON_BEHALF_OF_NAME: &str = "SentOnBehalfOfName";

    // Summary
    pub const SUMMARY_RECORD_ID: &str = "SummaryRecordId";
    pub const SERVICE_DESCRIPTION: &str = "ServiceDescription";
    pub const COMMERCIAL_MODEL: &str = "CommercialModel";
    pub const USE_TYPE: &str = "UseType";
    pub const TERRITORY: &str = "Territory";
    pub const START_OF_PERIOD: &str = "StartOfClaimPeriod";
    pub const END_OF_PERIOD: &str = "EndOfClaimPeriod";
    pub const PERIOD_RANGE: &str = "Start/End";
    pub const CLAIM_BASIS: &str = "ClaimBasis";
    pub const CURRENCY_OF_REPORTING: &str = "CurrencyOfReporting";
    pub const CURRENCY_OF_INVOICING: &str = "CurrencyOfInvoicing";
    pub const EXCHANGE_RATE: &str = "ExchangeRate";
    pub const MECHANICAL_SPLIT: &str = "MechanicalRightsSplit";
    pub const PERFORMING_SPLIT: &str = "PerformingRightsSplit";
    pub const SPLIT_PAIR: &str = "MechanicalRightsSplit/PerformingRightsSplit";
    pub const TOTAL_CLAIMED_AMOUNT: &str = "TotalClaimedAmount";

    // Detail
    pub const CLAIM_ID: &str = "ClaimId";
    pub const ISRC: &str = "ISRC";
    pub const ISWC: &str = "ISWC";
    pub const WORK_TITLE: &str = "WorkTitle";
    pub const COMPOSER_AUTHOR_NAMES: &str = "ComposerAuthorNames";
    pub const COMPOSER_AUTHOR_PARTY_IDS: &str = "ComposerAuthorPartyIds";
    pub const RIGHTS_CONTROLLER_NAME: &str = "RightsControllerName";
    pub const RIGHTS_CONTROLLER_PARTY_ID: &str = "RightsControllerPartyId";
    pub const SHARE_MECHANICAL: &str = "RightShareMechanical";
    pub const SHARE_PERFORMING: &str = "RightSharePerforming";
    pub const SHARE_BLENDED: &str = "RightShareBlended";
    pub const AMOUNT_MECHANICAL: &str = "ClaimedAmountMechanical";
    pub const AMOUNT_PERFORMING: &str = "ClaimedAmountPerforming";
    pub const AMOUNT_TOTAL: &str = "ClaimedAmountTotal";
    pub const TARIFF_PARAMETER_TYPES: &str = "TariffParameterTypes";
    pub const TARIFF_PARAMETER_VALUES: &str = "TariffParameterValues";
    pub const NUMBER_OF_USAGES: &str = "NumberOfUsages";

    // Footer
    pub const NUMBER_OF_LINES: &str = "NumberOfLinesInFile";
    pub const NUMBER_OF_SUMMARY_RECORDS: &str = "NumberOfSummaryRecords";
}
