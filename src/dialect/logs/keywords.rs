//! Static word tables of the log-search dialect

pub const FIELDS: &str = "fields";
pub const DISPLAY: &str = "display";
pub const FILTER: &str = "filter";
pub const STATS: &str = "stats";
pub const SORT: &str = "sort";
pub const LIMIT: &str = "limit";
pub const PARSE: &str = "parse";
pub const DEDUP: &str = "dedup";
pub const UNMASK: &str = "unmask";
pub const PATTERN: &str = "pattern";
pub const BY: &str = "by";
pub const AS: &str = "as";
pub const ASC: &str = "asc";
pub const DESC: &str = "desc";

/// Commands as `(name, description)`, in suggestion order
pub const COMMANDS: &[(&str, &str)] = &[
    (FIELDS, "Retrieve the specified fields from log events"),
    (DISPLAY, "Show only the specified fields in the results"),
    (FILTER, "Keep log events matching one or more conditions"),
    (STATS, "Aggregate log events by field values"),
    (SORT, "Order the results"),
    (LIMIT, "Cap the number of returned events"),
    (PARSE, "Extract ephemeral fields with a glob or regular expression"),
    (DEDUP, "Drop duplicate results by field values"),
    (UNMASK, "Show masked content of log events"),
    (PATTERN, "Cluster log events into patterns"),
    ("diff", "Compare log events with an earlier time range"),
    ("anomaly", "Detect unusual patterns in log events"),
];

pub const KEYWORDS: &[&str] = &[BY, AS, ASC, DESC];

pub const WORD_OPERATORS: &[&str] = &["and", "or", "not", "like", "in"];

pub const SYMBOL_OPERATORS: &[&str] = &[
    "=", "!=", "<", "<=", ">", ">=", "=~", "+", "-", "*", "/", "%", "^",
];

pub const COMPARISON_OPERATORS: &[&str] = &[
    "=", "!=", "<", "<=", ">", ">=", "like", "not like", "in", "not in", "=~",
];

pub const LOGICAL_OPERATORS: &[&str] = &["and", "or"];

pub const SORT_DIRECTIONS: &[&str] = &[ASC, DESC];

/// Aggregations usable in `stats`
pub const STATS_FUNCTIONS: &[(&str, &str)] = &[
    ("count", "Number of log events"),
    ("count_distinct", "Number of unique values of a field"),
    ("sum", "Sum of the values"),
    ("avg", "Average of the values"),
    ("min", "Smallest value"),
    ("max", "Largest value"),
    ("pct", "Value at a percentile"),
    ("stddev", "Standard deviation of the values"),
    ("earliest", "Value from the earliest event"),
    ("latest", "Value from the latest event"),
    ("sortsFirst", "Value that sorts first"),
    ("sortsLast", "Value that sorts last"),
];

/// General functions
pub const FUNCTIONS: &[(&str, &str)] = &[
    ("bin", "Round a timestamp down to a period, e.g. bin(5m)"),
    ("abs", "Absolute value"),
    ("ceil", "Round up to an integer"),
    ("floor", "Round down to an integer"),
    ("greatest", "Largest of the arguments"),
    ("least", "Smallest of the arguments"),
    ("log", "Natural logarithm"),
    ("sqrt", "Square root"),
    ("strlen", "Length of a string"),
    ("toupper", "Upper-cased string"),
    ("tolower", "Lower-cased string"),
    ("trim", "String without surrounding whitespace"),
    ("substr", "Part of a string"),
    ("replace", "String with occurrences replaced"),
    ("concat", "Concatenation of the arguments"),
    ("strcontains", "Whether a string contains another"),
    ("ispresent", "Whether a field exists"),
    ("isempty", "Whether a field is missing or empty"),
    ("isblank", "Whether a field is missing, empty or whitespace"),
    ("isValidIp", "Whether a string is an IP address"),
    ("datefloor", "Truncate a timestamp to a period"),
    ("dateceil", "Round a timestamp up to a period"),
    ("fromMillis", "Timestamp from epoch milliseconds"),
    ("toMillis", "Epoch milliseconds of a timestamp"),
    ("coalesce", "First non-null argument"),
];

/// Functions usable as a whole `filter` predicate
pub const BOOLEAN_FUNCTIONS: &[&str] = &[
    "ispresent",
    "isempty",
    "isblank",
    "strcontains",
    "isValidIp",
];

pub fn is_boolean_function(word: &str) -> bool {
    BOOLEAN_FUNCTIONS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(word))
}

/// Check whether `word` names a `stats` aggregation
pub fn is_stats_function(word: &str) -> bool {
    STATS_FUNCTIONS
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(word))
}
