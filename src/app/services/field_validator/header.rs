//! Header record rules

use super::rules::{FindingCollector, IdFormat};
use crate::app::models::{Finding, HeaderRecord, RecordKind};
use crate::config::ValidatorConfig;
use crate::constants::fields;

/// Validate a header record
pub fn validate_header(header: &HeaderRecord, config: &ValidatorConfig) -> Vec<Finding> {
    let mut rules = FindingCollector::new(RecordKind::Header, header.line);
    let allowed = &config.allowed_values;

    rules.fixed_value(&header.record_type, RecordKind::Header.accepted_tags());

    rules.mandatory(fields::MESSAGE_VERSION, header.message_version.as_deref());
    rules.mandatory(fields::MESSAGE_ID, header.message_id.as_deref());

    let profile = rules.mandatory(fields::PROFILE, header.profile.as_deref());
    rules.allowed(fields::PROFILE, profile, &allowed.profiles);

    let created = rules.mandatory(fields::MESSAGE_CREATED, header.created.as_deref());
    rules.timestamp(fields::MESSAGE_CREATED, created);

    let sender = rules.mandatory(fields::SENDER_PARTY_ID, header.sender_party_id.as_deref());
    rules.identifier(fields::SENDER_PARTY_ID, sender, IdFormat::Dpid);
    let sender_name = rules.mandatory(fields::SENDER_NAME, header.sender_name.as_deref());
    rules.escaping(fields::SENDER_NAME, sender_name);

    let recipient = rules.mandatory(
        fields::RECIPIENT_PARTY_ID,
        header.recipient_party_id.as_deref(),
    );
    rules.identifier(fields::RECIPIENT_PARTY_ID, recipient, IdFormat::Dpid);
    let recipient_name = rules.mandatory(fields::RECIPIENT_NAME, header.recipient_name.as_deref());
    rules.escaping(fields::RECIPIENT_NAME, recipient_name);

    // Delegated sender
    rules.identifier(
        fields::ON_BEHALF_OF_PARTY_ID,
        header.on_behalf_of_party_id.as_deref(),
        IdFormat::Dpid,
    );
    rules.requires(
        fields::ON_BEHALF_OF_PARTY_ID,
        header.on_behalf_of_party_id.is_some(),
        fields::ON_BEHALF_OF_NAME,
        header.on_behalf_of_name.is_some(),
    );
    rules.escaping(fields::ON_BEHALF_OF_NAME, header.on_behalf_of_name.as_deref());

    rules.into_findings()
}
