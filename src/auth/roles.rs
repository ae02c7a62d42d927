//! Roles configured at the identity provider and the permissions each one is
//! granted. Tokens carry the permissions, not the role, so this table is only
//! used for tooling and tests.

pub const ASSISTANT: &[&str] = &["get:actors", "get:movies", "get:cast"];

pub const DIRECTOR: &[&str] = &[
    "get:actors",
    "get:movies",
    "get:cast",
    "post:actors",
    "patch:actors",
    "patch:movies",
    "delete:actors",
];

pub const PRODUCER: &[&str] = &[
    "get:actors",
    "get:movies",
    "get:cast",
    "post:actors",
    "patch:actors",
    "patch:movies",
    "delete:actors",
    "post:movies",
    "delete:movies",
    "post:cast",
];

pub const ROLES: &[(&str, &[&str])] = &[
    ("Casting Assistant", ASSISTANT),
    ("Casting Director", DIRECTOR),
    ("Executive Producer", PRODUCER),
];
