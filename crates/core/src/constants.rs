/// Namespace prefix added to unqualified concept and axis names
pub const DEFAULT_NAMESPACE_PREFIX: &str = "solar";

/// Catch-all entrypoint that contains every concept; never inferred
pub const ALL_ENTRYPOINT: &str = "All";

/// Name of the table holding line items that belong to no hypercube
pub const NON_TABLE_CONCEPTS: &str = "NonTableConcepts";

/// Suffix that marks a keyword or aspect as an axis
pub const AXIS_SUFFIX: &str = "Axis";

/// Marker of line-item roots in the concept tree
pub const LINE_ITEM_MARKER: &str = "LineItem";

/// Concept names containing this marker carry UUID identifiers
pub const IDENTIFIER_MARKER: &str = "Identifier";

/// Identifier concept exempt from the UUID format check
pub const LEGAL_ENTITY_IDENTIFIER: &str = "dei:LegalEntityIdentifier";

/// Timestamp format used in both wire formats
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date-only format accepted when reading timestamps
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Period keyword for the open-ended duration
pub const FOREVER: &str = "forever";

/// Default entity identifier scheme
pub const DEFAULT_ENTITY_SCHEME: &str = "http://xbrl.org/entity/identification/scheme";

/// Default schema reference written into documents
pub const DEFAULT_SCHEMA_HREF: &str =
    "https://raw.githubusercontent.com/SunSpecOrangeButton/solar-taxonomy/master/core/solar_all_2019-09-20_r01.xsd";

/// `documentType` of the JSON envelope
pub const JSON_DOCUMENT_TYPE: &str = "http://www.xbrl.org/WGWD/YYYY-MM-DD/xbrl-json";

/// Namespaces declared by every XML document and JSON envelope
pub const FIXED_NAMESPACES: &[(&str, &str)] = &[
    ("xbrli", "http://www.xbrl.org/2003/instance"),
    ("link", "http://www.xbrl.org/2003/linkbase"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xbrldi", "http://xbrl.org/2006/xbrldi"),
    ("iso4217", "http://www.xbrl.org/2003/iso4217"),
    ("solar", "http://xbrl.us/Solar/v1.3/2019-09-20/solar"),
];

/// Namespaces declared only when a concept or unit measure uses them
pub const OPTIONAL_NAMESPACES: &[(&str, &str)] = &[
    ("us-gaap", "http://fasb.org/us-gaap/2017-01-31"),
    ("dei", "http://xbrl.sec.gov/dei/2014-01-31"),
    ("units", "http://www.xbrl.org/2009/utr"),
];
