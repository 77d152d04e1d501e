//! Static word tables of the analytics pipeline dialect

pub const WHERE: &str = "where";
pub const FIELDS: &str = "fields";
pub const STATS: &str = "stats";
pub const EVENTSTATS: &str = "eventstats";
pub const SORT: &str = "sort";
pub const EVAL: &str = "eval";
pub const HEAD: &str = "head";
pub const RARE: &str = "rare";
pub const TOP: &str = "top";
pub const DEDUP: &str = "dedup";
pub const FILLNULL: &str = "fillnull";
pub const BY: &str = "by";
pub const AS: &str = "as";
pub const NOT: &str = "not";
pub const IN: &str = "in";

/// Commands as `(name, description)`, in suggestion order
pub const COMMANDS: &[(&str, &str)] = &[
    (WHERE, "Keep results matching a boolean expression"),
    (FIELDS, "Keep (+) or remove (-) fields from the results"),
    (STATS, "Aggregate results"),
    (EVENTSTATS, "Add aggregations to every result"),
    (SORT, "Order results by fields"),
    (EVAL, "Compute new fields from expressions"),
    (HEAD, "Return the first N results"),
    (RARE, "Least common values of fields"),
    (TOP, "Most common values of fields"),
    (DEDUP, "Drop duplicate results by fields"),
    ("parse", "Extract new fields with a regular expression"),
    (FILLNULL, "Replace null values"),
    ("trendline", "Moving averages of fields"),
];

pub const KEYWORDS: &[&str] = &[BY, AS, NOT, IN, "asc", "desc"];

pub const WORD_OPERATORS: &[&str] = &["and", "or", "xor"];

pub const SYMBOL_OPERATORS: &[&str] = &[
    "=", "==", "!=", "<", "<=", ">", ">=", "+", "-", "*", "/", "%",
];

pub const COMPARISON_OPERATORS: &[&str] = &["=", "!=", "<", "<=", ">", ">="];

pub const LOGICAL_OPERATORS: &[&str] = &["and", "or", "xor"];

/// Field prefixes of the `fields` command
pub const FIELD_MODIFIERS: &[&str] = &["+", "-"];

/// Aggregations usable in `stats`
pub const STATS_FUNCTIONS: &[(&str, &str)] = &[
    ("count", "Number of results"),
    ("sum", "Sum of the values"),
    ("avg", "Average of the values"),
    ("min", "Smallest value"),
    ("max", "Largest value"),
    ("distinct_count", "Number of unique values"),
    ("percentile", "Value at a percentile"),
    ("stddev_samp", "Sample standard deviation"),
    ("stddev_pop", "Population standard deviation"),
    ("var_samp", "Sample variance"),
    ("var_pop", "Population variance"),
    ("earliest", "Value from the earliest result"),
    ("latest", "Value from the latest result"),
];

/// Functions returning a boolean
pub const BOOLEAN_FUNCTIONS: &[(&str, &str)] = &[
    ("isnull", "Whether the value is null"),
    ("isnotnull", "Whether the value is not null"),
    ("ispresent", "Whether the field exists"),
    ("isempty", "Whether the value is null or empty"),
    ("isblank", "Whether the value is null, empty or whitespace"),
    ("like", "Whether a string matches a wildcard pattern"),
    ("cidrmatch", "Whether an IP address is in a CIDR block"),
];

/// General eval and where functions
pub const FUNCTIONS: &[(&str, &str)] = &[
    ("abs", "Absolute value"),
    ("ceil", "Round up to an integer"),
    ("floor", "Round down to an integer"),
    ("round", "Round to a number of decimals"),
    ("sqrt", "Square root"),
    ("pow", "Value raised to a power"),
    ("mod", "Remainder of a division"),
    ("concat", "Concatenation of the arguments"),
    ("length", "Length of a string"),
    ("lower", "Lower-cased string"),
    ("upper", "Upper-cased string"),
    ("trim", "String without surrounding whitespace"),
    ("substring", "Part of a string"),
    ("replace", "String with occurrences replaced"),
    ("ifnull", "Fallback for a null value"),
    ("nullif", "Null when two values are equal"),
    ("if", "Value chosen by a condition"),
    ("cast", "Value converted to another type"),
    ("now", "Current timestamp"),
    ("date_format", "Formatted timestamp"),
];

/// `span(field, interval)` bucket used after `by`
pub const SPAN_SNIPPET: &str = "span(${1:@timestamp}, ${2:5m})";

pub fn is_boolean_function(word: &str) -> bool {
    BOOLEAN_FUNCTIONS
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(word))
}
