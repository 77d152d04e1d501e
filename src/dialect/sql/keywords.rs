//! Static word tables of the SQL dialect

pub const SELECT: &str = "SELECT";
pub const FROM: &str = "FROM";
pub const WHERE: &str = "WHERE";
pub const GROUP: &str = "GROUP";
pub const ORDER: &str = "ORDER";
pub const BY: &str = "BY";
pub const HAVING: &str = "HAVING";
pub const LIMIT: &str = "LIMIT";
pub const JOIN: &str = "JOIN";
pub const ON: &str = "ON";
pub const AS: &str = "AS";
pub const DISTINCT: &str = "DISTINCT";
pub const ASC: &str = "ASC";
pub const DESC: &str = "DESC";
pub const CASE: &str = "CASE";
pub const WHEN: &str = "WHEN";
pub const THEN: &str = "THEN";
pub const ELSE: &str = "ELSE";
pub const END: &str = "END";

/// Words that qualify a following `JOIN`
pub const JOIN_TYPES: &[&str] = &["INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS"];

/// Clauses whose body is a predicate
pub const PREDICATE_CLAUSES: &[&str] = &[WHERE, ON, HAVING, WHEN];

pub const KEYWORDS: &[&str] = &[
    SELECT, FROM, WHERE, GROUP, ORDER, BY, HAVING, LIMIT, JOIN, "INNER", "LEFT", "RIGHT", "FULL",
    "OUTER", "CROSS", ON, AS, DISTINCT, ASC, DESC, CASE, WHEN, THEN, ELSE, END, "UNION", "ALL",
    "OFFSET", "WITH",
];

/// Word operators; the tokenizer tags these as operators, not keywords
pub const WORD_OPERATORS: &[&str] = &[
    "AND", "OR", "NOT", "LIKE", "IN", "IS", "BETWEEN", "RLIKE", "REGEXP",
];

pub const SYMBOL_OPERATORS: &[&str] = &[
    "=", "!=", "<>", "<", "<=", ">", ">=", "+", "-", "*", "/", "%", "||",
];

pub const COMPARISON_OPERATORS: &[&str] = &[
    "=", "!=", "<>", "<", "<=", ">", ">=", "LIKE", "NOT LIKE", "IN", "NOT IN", "IS", "IS NOT",
    "BETWEEN", "RLIKE", "REGEXP",
];

pub const LOGICAL_OPERATORS: &[&str] = &["AND", "OR"];

pub const JOIN_KEYWORDS: &[&str] = &[
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
];

pub const LITERALS: &[&str] = &["NULL", "TRUE", "FALSE"];

/// Functions as `(name, description)`
pub const FUNCTIONS: &[(&str, &str)] = &[
    ("COUNT", "Number of rows or non-null values"),
    ("SUM", "Sum of the values"),
    ("AVG", "Average of the values"),
    ("MIN", "Smallest value"),
    ("MAX", "Largest value"),
    ("APPROX_COUNT_DISTINCT", "Approximate number of distinct values"),
    ("PERCENTILE", "Value at the given percentile"),
    ("STDDEV", "Sample standard deviation"),
    ("ABS", "Absolute value"),
    ("CEIL", "Smallest integer not less than the value"),
    ("FLOOR", "Largest integer not greater than the value"),
    ("ROUND", "Value rounded to the given scale"),
    ("POWER", "Value raised to a power"),
    ("SQRT", "Square root"),
    ("CONCAT", "Concatenation of the arguments"),
    ("LOWER", "Lower-cased string"),
    ("UPPER", "Upper-cased string"),
    ("LENGTH", "Length of a string"),
    ("SUBSTRING", "Part of a string"),
    ("TRIM", "String without surrounding whitespace"),
    ("REPLACE", "String with occurrences replaced"),
    ("COALESCE", "First non-null argument"),
    ("IF", "Value chosen by a condition"),
    ("CAST", "Value converted to another type"),
    ("DATE_TRUNC", "Timestamp truncated to a unit"),
    ("FROM_UNIXTIME", "Timestamp from epoch seconds"),
    ("NOW", "Current timestamp"),
];
