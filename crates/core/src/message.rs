//! Request message domain types.
//!
//! A request is built per operator action: the assembler fills the body,
//! writes the header through [`FieldWriter`], and the finished message is
//! either moved into the protocol engine or dropped.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{Field, FieldMap, FieldWriter};
use crate::tag::{self, Tag};

/// FIX protocol versions an operator can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    #[serde(rename = "FIX.4.0")]
    Fix40,
    #[serde(rename = "FIX.4.1")]
    Fix41,
    #[serde(rename = "FIX.4.2")]
    Fix42,
    #[serde(rename = "FIX.4.3")]
    Fix43,
    #[serde(rename = "FIX.4.4")]
    Fix44,
    #[serde(rename = "FIX.5.0")]
    Fix50,
    #[serde(rename = "FIX.5.0SP1")]
    Fix50Sp1,
    #[serde(rename = "FIX.5.0SP2")]
    Fix50Sp2,
}

impl ProtocolVersion {
    /// All versions in menu order.
    pub const ALL: [ProtocolVersion; 8] = [
        ProtocolVersion::Fix40,
        ProtocolVersion::Fix41,
        ProtocolVersion::Fix42,
        ProtocolVersion::Fix43,
        ProtocolVersion::Fix44,
        ProtocolVersion::Fix50,
        ProtocolVersion::Fix50Sp1,
        ProtocolVersion::Fix50Sp2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProtocolVersion::Fix40 => "FIX.4.0",
            ProtocolVersion::Fix41 => "FIX.4.1",
            ProtocolVersion::Fix42 => "FIX.4.2",
            ProtocolVersion::Fix43 => "FIX.4.3",
            ProtocolVersion::Fix44 => "FIX.4.4",
            ProtocolVersion::Fix50 => "FIX.5.0",
            ProtocolVersion::Fix50Sp1 => "FIX.5.0SP1",
            ProtocolVersion::Fix50Sp2 => "FIX.5.0SP2",
        }
    }

    /// Tag 8 value. FIX 5.x application messages travel over FIXT.1.1.
    pub fn begin_string(&self) -> &'static str {
        match self {
            ProtocolVersion::Fix50 | ProtocolVersion::Fix50Sp1 | ProtocolVersion::Fix50Sp2 => {
                "FIXT.1.1"
            }
            other => other.label(),
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.label()).collect()
    }

    /// Version for a 1-based menu index.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// SubscriptionRequestType (263).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionRequestType {
    Snapshot,
    SnapshotPlusUpdates,
    DisablePreviousSnapshotPlusUpdateRequest,
}

impl SubscriptionRequestType {
    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionRequestType::Snapshot => "0",
            SubscriptionRequestType::SnapshotPlusUpdates => "1",
            SubscriptionRequestType::DisablePreviousSnapshotPlusUpdateRequest => "2",
        }
    }
}

/// MDEntryType (269).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdEntryType {
    Bid,
    Offer,
    Trade,
}

impl MdEntryType {
    pub fn code(&self) -> &'static str {
        match self {
            MdEntryType::Bid => "0",
            MdEntryType::Offer => "1",
            MdEntryType::Trade => "2",
        }
    }
}

/// SecurityListRequestType (559).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityListRequestType {
    Symbol,
    SecurityTypeAndOrCficode,
    Product,
    TradingSessionId,
    AllSecurities,
}

impl SecurityListRequestType {
    pub fn code(&self) -> &'static str {
        match self {
            SecurityListRequestType::Symbol => "0",
            SecurityListRequestType::SecurityTypeAndOrCficode => "1",
            SecurityListRequestType::Product => "2",
            SecurityListRequestType::TradingSessionId => "3",
            SecurityListRequestType::AllSecurities => "4",
        }
    }
}

/// Session routing fields common to every outbound message.
///
/// SenderCompID and TargetCompID are required; TargetSubID is only present
/// when the operator opted into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    fields: FieldMap,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender_comp_id(&self) -> Option<&str> {
        self.fields.get_str(tag::SENDER_COMP_ID)
    }

    pub fn target_comp_id(&self) -> Option<&str> {
        self.fields.get_str(tag::TARGET_COMP_ID)
    }

    pub fn target_sub_id(&self) -> Option<&str> {
        self.fields.get_str(tag::TARGET_SUB_ID)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn is_complete(&self) -> bool {
        self.sender_comp_id().is_some() && self.target_comp_id().is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.sender_comp_id().is_none() {
            return Err(Error::IncompleteMessage("header is missing SenderCompID".into()));
        }
        if self.target_comp_id().is_none() {
            return Err(Error::IncompleteMessage("header is missing TargetCompID".into()));
        }
        Ok(())
    }
}

impl FieldWriter for Header {
    fn set(&mut self, field: Field) {
        self.fields.set(field);
    }
}

/// Whether a repeating group may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRule {
    /// At least one entry is mandatory.
    Required,
    /// An empty group is left out of the message entirely.
    Optional,
}

/// One entry of a repeating group.
pub trait GroupEntry {
    fn fields(&self) -> Vec<Field>;
}

/// Ordered list of homogeneous entries introduced by a count tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatingGroup<E> {
    pub count_tag: Tag,
    pub rule: GroupRule,
    pub entries: Vec<E>,
}

impl<E: GroupEntry> RepeatingGroup<E> {
    pub fn new(count_tag: Tag, rule: GroupRule) -> Self {
        Self {
            count_tag,
            rule,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: E) -> &mut E {
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count field followed by each entry's fields. Empty optional groups
    /// contribute nothing.
    pub fn fields(&self) -> Vec<Field> {
        if self.entries.is_empty() && self.rule == GroupRule::Optional {
            return Vec::new();
        }
        let mut out = vec![Field::int(self.count_tag, self.entries.len() as u32)];
        for entry in &self.entries {
            out.extend(entry.fields());
        }
        out
    }

    pub fn validate(&self) -> Result<()> {
        if self.rule == GroupRule::Required && self.entries.is_empty() {
            return Err(Error::IncompleteMessage(format!(
                "repeating group {} needs at least one entry",
                self.count_tag
            )));
        }
        Ok(())
    }
}

/// NoMDEntryTypes entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdEntryTypeEntry {
    pub md_entry_type: MdEntryType,
}

impl GroupEntry for MdEntryTypeEntry {
    fn fields(&self) -> Vec<Field> {
        vec![Field::code(tag::MD_ENTRY_TYPE, self.md_entry_type.code())]
    }
}

/// NoRelatedSym entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedSymEntry {
    pub symbol: String,
}

impl GroupEntry for RelatedSymEntry {
    fn fields(&self) -> Vec<Field> {
        vec![Field::text(tag::SYMBOL, self.symbol.clone())]
    }
}

/// MarketDataRequest (35=V).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataRequest {
    pub header: Header,
    pub md_req_id: String,
    pub subscription_request_type: SubscriptionRequestType,
    pub market_depth: u32,
    pub entry_types: RepeatingGroup<MdEntryTypeEntry>,
    pub related_sym: RepeatingGroup<RelatedSymEntry>,
}

impl MarketDataRequest {
    pub fn new(
        md_req_id: impl Into<String>,
        subscription_request_type: SubscriptionRequestType,
        market_depth: u32,
    ) -> Self {
        Self {
            header: Header::new(),
            md_req_id: md_req_id.into(),
            subscription_request_type,
            market_depth,
            entry_types: RepeatingGroup::new(tag::NO_MD_ENTRY_TYPES, GroupRule::Required),
            related_sym: RepeatingGroup::new(tag::NO_RELATED_SYM, GroupRule::Required),
        }
    }

    pub fn body_fields(&self) -> Vec<Field> {
        let mut out = vec![
            Field::identifier(tag::MD_REQ_ID, self.md_req_id.clone()),
            Field::code(
                tag::SUBSCRIPTION_REQUEST_TYPE,
                self.subscription_request_type.code(),
            ),
            Field::int(tag::MARKET_DEPTH, self.market_depth),
        ];
        out.extend(self.entry_types.fields());
        out.extend(self.related_sym.fields());
        out
    }
}

impl FieldWriter for MarketDataRequest {
    fn set(&mut self, field: Field) {
        self.header.set(field);
    }
}

/// SecurityListRequest (35=x).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityListRequest {
    pub header: Header,
    pub security_req_id: String,
    pub request_type: SecurityListRequestType,
}

impl SecurityListRequest {
    pub fn new(security_req_id: impl Into<String>, request_type: SecurityListRequestType) -> Self {
        Self {
            header: Header::new(),
            security_req_id: security_req_id.into(),
            request_type,
        }
    }

    pub fn body_fields(&self) -> Vec<Field> {
        vec![
            Field::identifier(tag::SECURITY_REQ_ID, self.security_req_id.clone()),
            Field::code(tag::SECURITY_LIST_REQUEST_TYPE, self.request_type.code()),
        ]
    }
}

impl FieldWriter for SecurityListRequest {
    fn set(&mut self, field: Field) {
        self.header.set(field);
    }
}

/// The request kinds the builder can assemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestMessage {
    MarketData(MarketDataRequest),
    SecurityList(SecurityListRequest),
}

impl RequestMessage {
    pub fn name(&self) -> &'static str {
        match self {
            RequestMessage::MarketData(_) => "MarketDataRequest",
            RequestMessage::SecurityList(_) => "SecurityListRequest",
        }
    }

    pub fn msg_type(&self) -> &'static str {
        match self {
            RequestMessage::MarketData(_) => "V",
            RequestMessage::SecurityList(_) => "x",
        }
    }

    /// Both request kinds are only built for FIX 4.4.
    pub fn version(&self) -> ProtocolVersion {
        ProtocolVersion::Fix44
    }

    pub fn begin_string(&self) -> &'static str {
        self.version().begin_string()
    }

    pub fn header(&self) -> &Header {
        match self {
            RequestMessage::MarketData(m) => &m.header,
            RequestMessage::SecurityList(m) => &m.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut Header {
        match self {
            RequestMessage::MarketData(m) => &mut m.header,
            RequestMessage::SecurityList(m) => &mut m.header,
        }
    }

    /// Every field in message order: BeginString, MsgType, routing header,
    /// then body with each group's count followed by its entries.
    pub fn fields(&self) -> Vec<Field> {
        let mut out = vec![
            Field::identifier(tag::BEGIN_STRING, self.begin_string()),
            Field::code(tag::MSG_TYPE, self.msg_type()),
        ];
        out.extend(self.header().fields().cloned());
        match self {
            RequestMessage::MarketData(m) => out.extend(m.body_fields()),
            RequestMessage::SecurityList(m) => out.extend(m.body_fields()),
        }
        out
    }

    /// Human readable `tag=value` listing joined by `delimiter`. Framing
    /// fields (BodyLength, CheckSum) belong to the engine and are omitted.
    pub fn to_tag_value(&self, delimiter: char) -> String {
        self.fields()
            .iter()
            .map(Field::render)
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }

    /// Check the header and group invariants.
    pub fn validate(&self) -> Result<()> {
        self.header().validate()?;
        if let RequestMessage::MarketData(m) = self {
            m.entry_types.validate()?;
            m.related_sym.validate()?;
        }
        Ok(())
    }
}

impl FieldWriter for RequestMessage {
    fn set(&mut self, field: Field) {
        self.header_mut().set(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_market_data() -> MarketDataRequest {
        let mut req =
            MarketDataRequest::new("MARKETDATAID", SubscriptionRequestType::SnapshotPlusUpdates, 0);
        req.entry_types.add(MdEntryTypeEntry {
            md_entry_type: MdEntryType::Bid,
        });
        req.related_sym.add(RelatedSymEntry {
            symbol: "US00084EAE86".into(),
        });
        req.set(Field::identifier(tag::SENDER_COMP_ID, "A"));
        req.set(Field::identifier(tag::TARGET_COMP_ID, "B"));
        req
    }

    #[test]
    fn market_data_tag_value_layout() {
        let msg = RequestMessage::MarketData(sample_market_data());
        assert_eq!(
            msg.to_tag_value('|'),
            "8=FIX.4.4|35=V|49=A|56=B|262=MARKETDATAID|263=1|264=0|267=1|269=0|146=1|55=US00084EAE86"
        );
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn security_list_tag_value_layout() {
        let mut req = SecurityListRequest::new("SECURITYREQID", SecurityListRequestType::AllSecurities);
        req.set(Field::identifier(tag::SENDER_COMP_ID, "A"));
        req.set(Field::identifier(tag::TARGET_COMP_ID, "B"));
        req.set(Field::identifier(tag::TARGET_SUB_ID, "SUB1"));
        let msg = RequestMessage::SecurityList(req);
        assert_eq!(msg.msg_type(), "x");
        assert_eq!(
            msg.to_tag_value('|'),
            "8=FIX.4.4|35=x|49=A|56=B|57=SUB1|320=SECURITYREQID|559=4"
        );
    }

    #[test]
    fn header_without_sub_id_has_no_tag_57() {
        let req = sample_market_data();
        assert_eq!(req.header.target_sub_id(), None);
        assert!(req.header.fields().all(|f| f.tag != tag::TARGET_SUB_ID));
    }

    #[test]
    fn missing_target_is_incomplete() {
        let mut header = Header::new();
        header.set(Field::identifier(tag::SENDER_COMP_ID, "A"));
        assert!(!header.is_complete());
        assert!(matches!(header.validate(), Err(Error::IncompleteMessage(_))));
    }

    #[test]
    fn required_group_must_not_be_empty() {
        let mut req = sample_market_data();
        req.related_sym.entries.clear();
        let msg = RequestMessage::MarketData(req);
        assert!(matches!(msg.validate(), Err(Error::IncompleteMessage(_))));
    }

    #[test]
    fn empty_optional_group_is_omitted() {
        let group: RepeatingGroup<RelatedSymEntry> =
            RepeatingGroup::new(tag::NO_RELATED_SYM, GroupRule::Optional);
        assert!(group.fields().is_empty());
        assert!(group.validate().is_ok());
    }

    #[test]
    fn version_menu_lookup() {
        assert_eq!(ProtocolVersion::from_index(5), Some(ProtocolVersion::Fix44));
        assert_eq!(ProtocolVersion::from_index(0), None);
        assert_eq!(ProtocolVersion::from_index(9), None);
        assert_eq!(ProtocolVersion::Fix50Sp2.begin_string(), "FIXT.1.1");
    }

    #[test]
    fn message_serializes_with_kind_tag() {
        let msg = RequestMessage::MarketData(sample_market_data());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "market_data");
        assert_eq!(json["related_sym"]["entries"][0]["symbol"], "US00084EAE86");
        let back: RequestMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }
}
