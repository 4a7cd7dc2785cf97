//! Development fixtures: five clients and four staff accounts.

use crate::repository::StoredCredential;
use chrono::{DateTime, Utc};
use roster_core::{Client, ClientStatus, Credential, Role};

struct ClientFixture {
    id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    date_of_birth: &'static str,
    address: &'static str,
    emergency_contact_name: &'static str,
    emergency_contact_phone: &'static str,
    status: ClientStatus,
}

const CLIENT_FIXTURES: &[ClientFixture] = &[
    ClientFixture {
        id: "client-001",
        first_name: "John",
        last_name: "Doe",
        email: "john.doe@example.com",
        phone: "555-0101",
        date_of_birth: "1985-03-15",
        address: "123 Main St, Anytown, ST 12345",
        emergency_contact_name: "Jane Doe",
        emergency_contact_phone: "555-0102",
        status: ClientStatus::Active,
    },
    ClientFixture {
        id: "client-002",
        first_name: "Sarah",
        last_name: "Smith",
        email: "sarah.smith@example.com",
        phone: "555-0201",
        date_of_birth: "1990-07-22",
        address: "456 Oak Ave, Somewhere, ST 67890",
        emergency_contact_name: "Bob Smith",
        emergency_contact_phone: "555-0202",
        status: ClientStatus::Active,
    },
    ClientFixture {
        id: "client-003",
        first_name: "Michael",
        last_name: "Johnson",
        email: "michael.johnson@example.com",
        phone: "555-0301",
        date_of_birth: "1988-11-08",
        address: "789 Pine Rd, Elsewhere, ST 11111",
        emergency_contact_name: "Mary Johnson",
        emergency_contact_phone: "555-0302",
        status: ClientStatus::Active,
    },
    ClientFixture {
        id: "client-004",
        first_name: "Emily",
        last_name: "Williams",
        email: "emily.williams@example.com",
        phone: "555-0401",
        date_of_birth: "1992-05-30",
        address: "321 Elm St, Nowhere, ST 22222",
        emergency_contact_name: "David Williams",
        emergency_contact_phone: "555-0402",
        status: ClientStatus::Inactive,
    },
    ClientFixture {
        id: "client-005",
        first_name: "James",
        last_name: "Brown",
        email: "james.brown@example.com",
        phone: "555-0501",
        date_of_birth: "1987-09-14",
        address: "654 Maple Dr, Anywhere, ST 33333",
        emergency_contact_name: "Lisa Brown",
        emergency_contact_phone: "555-0502",
        status: ClientStatus::Active,
    },
];

// (id, username, first, last, role)
const STAFF_FIXTURES: &[(&str, &str, &str, &str, Role)] = &[
    ("user-001", "admin", "Admin", "User", Role::Admin),
    ("user-002", "counsellor1", "Alice", "Counsellor", Role::Counsellor),
    ("user-003", "counsellor2", "Bob", "Therapist", Role::Counsellor),
    ("user-004", "staff1", "Charlie", "Staff", Role::Staff),
];

pub fn fixture_clients(now: DateTime<Utc>) -> Vec<Client> {
    CLIENT_FIXTURES
        .iter()
        .map(|f| Client {
            id: f.id.to_string(),
            first_name: f.first_name.to_string(),
            last_name: f.last_name.to_string(),
            email: f.email.to_string(),
            phone: f.phone.to_string(),
            date_of_birth: f.date_of_birth.to_string(),
            address: f.address.to_string(),
            emergency_contact_name: f.emergency_contact_name.to_string(),
            emergency_contact_phone: f.emergency_contact_phone.to_string(),
            status: f.status,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Staff accounts sharing one password verifier, `<username>@example.com` emails.
pub fn fixture_staff(password_hash: &str, now: DateTime<Utc>) -> Vec<StoredCredential> {
    STAFF_FIXTURES
        .iter()
        .map(|(id, username, first, last, role)| StoredCredential {
            credential: Credential {
                id: id.to_string(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                first_name: first.to_string(),
                last_name: last.to_string(),
                role: *role,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
            password_hash: password_hash.to_string(),
        })
        .collect()
}
