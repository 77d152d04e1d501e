//! Static word tables of the metric math dialect

pub const SEARCH: &str = "SEARCH";
pub const FILL: &str = "FILL";

/// Functions as `(name, description)`, in suggestion order
pub const FUNCTIONS: &[(&str, &str)] = &[
    (SEARCH, "Time series matching a search expression"),
    ("METRICS", "Every metric of the request, optionally filtered by id prefix"),
    (FILL, "Fill missing values of a time series"),
    ("ABS", "Absolute value of each data point"),
    ("ANOMALY_DETECTION_BAND", "Expected band of values for a metric"),
    ("AVG", "Average of the data points"),
    ("CEIL", "Round each value up"),
    ("DATAPOINT_COUNT", "Number of data points with a value"),
    ("DIFF", "Difference between consecutive data points"),
    ("DIFF_TIME", "Seconds between consecutive data points"),
    ("FIRST", "Oldest time series of an array"),
    ("FLOOR", "Round each value down"),
    ("IF", "Value chosen per data point by a condition"),
    ("INSIGHT_RULE_METRIC", "Statistic of a contributor insight rule"),
    ("LAST", "Newest time series of an array"),
    ("LOG", "Natural logarithm of each value"),
    ("LOG10", "Base-10 logarithm of each value"),
    ("MAX", "Largest data point"),
    ("MIN", "Smallest data point"),
    ("PERIOD", "Period of the metric in seconds"),
    ("RATE", "Rate of change per second"),
    ("REMOVE_EMPTY", "Drop time series without data points"),
    ("RUNNING_SUM", "Running total of the data points"),
    ("SERVICE_QUOTA", "Quota of a usage metric"),
    ("SLICE", "Part of an array of time series"),
    ("SORT", "Sorted array of time series"),
    ("STDDEV", "Standard deviation of the data points"),
    ("SUM", "Sum of the data points"),
    ("TIME_SERIES", "Time series with a constant value"),
];

/// Fill strategies accepted as the second argument of `FILL`
pub const KEYWORD_ARGUMENTS: &[&str] = &["LINEAR", "REPEAT"];

/// Statistics accepted as the second argument of `SEARCH`
pub const STATISTICS: &[&str] = &[
    "Average",
    "Maximum",
    "Minimum",
    "Sum",
    "SampleCount",
    "p99",
    "p95",
    "p90",
    "p50",
];

/// Periods in seconds accepted as the third argument of `SEARCH`
pub const PERIODS: &[(&str, &str)] = &[
    ("60", "1 minute"),
    ("300", "5 minutes"),
    ("900", "15 minutes"),
    ("3600", "1 hour"),
    ("21600", "6 hours"),
    ("86400", "1 day"),
];

pub const OPERATORS: &[&str] = &["+", "-", "*", "/", "^", "==", "!=", "<", "<=", ">", ">="];

/// Operators offered after a complete operand
pub const SUGGESTED_OPERATORS: &[&str] = &["+", "-", "*", "/", "^"];
