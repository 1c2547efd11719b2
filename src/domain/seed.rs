//! The data set a new [`Store`](crate::Store) starts from.
//!
//! Some references deliberately dangle: request `2` is assigned to team `3`
//! and equipment `4` to team `4`, neither of which exists.

use chrono::NaiveDate;

use crate::domain::{
    Equipment, EquipmentId, EquipmentStatus, Health, MaintenanceRequest, MaintenanceStatus,
    MaintenanceType, Priority, RequestId, Role, Team, TeamId, User, UserId,
};

/// Seeded users.
#[must_use]
pub fn users() -> Vec<User> {
    [
        ("admin1", "Admin User", "admin@gearguard.io", Role::Admin),
        (
            "tech1",
            "Marcus Sterling",
            "m.sterling@gearguard.io",
            Role::Technician,
        ),
        (
            "tech2",
            "Sarah Connor",
            "s.connor@gearguard.io",
            Role::Technician,
        ),
        (
            "tech3",
            "Elena Rodriguez",
            "e.rodriguez@gearguard.io",
            Role::Technician,
        ),
    ]
    .into_iter()
    .map(|(id, name, email, role)| User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
    })
    .collect()
}

/// Seeded teams.
#[must_use]
pub fn teams() -> Vec<Team> {
    vec![
        Team::new(
            TeamId::new("1"),
            "Mechanical Squad",
            "Hydraulics & Engines",
            [UserId::new("tech1"), UserId::new("tech2")],
        ),
        Team::new(
            TeamId::new("2"),
            "Electrical Force",
            "Wiring & Controls",
            [UserId::new("tech3")],
        ),
    ]
}

/// Seeded equipment, in registration order.
#[must_use]
pub fn equipment() -> Vec<Equipment> {
    struct Row {
        id: &'static str,
        name: &'static str,
        serial: &'static str,
        category: &'static str,
        company: &'static str,
        location: &'static str,
        work_center: &'static str,
        health: u8,
        open: u32,
        technician: &'static str,
        team: &'static str,
    }

    let rows = [
        Row {
            id: "1",
            name: "CNC Milling Machine V2",
            serial: "CNC-88291",
            category: "Heavy Machinery",
            company: "Factory Floor A",
            location: "Section 12",
            work_center: "WC-01",
            health: 85,
            open: 0,
            technician: "tech1",
            team: "1",
        },
        Row {
            id: "2",
            name: "Industrial Forklift",
            serial: "FORK-3312",
            category: "Vehicles",
            company: "Warehouse B",
            location: "Dock 4",
            work_center: "WC-05",
            health: 25,
            open: 2,
            technician: "tech2",
            team: "1",
        },
        Row {
            id: "3",
            name: "Air Compressor Unit",
            serial: "AIR-1002",
            category: "Utility",
            company: "Factory Floor A",
            location: "Wall 4",
            work_center: "WC-01",
            health: 92,
            open: 0,
            technician: "tech1",
            team: "2",
        },
        Row {
            id: "4",
            name: "Server Rack Alpha",
            serial: "SRV-0001",
            category: "IT",
            company: "HQ",
            location: "Data Center",
            work_center: "WC-09",
            health: 15,
            open: 1,
            technician: "tech3",
            team: "4",
        },
        Row {
            id: "5",
            name: "Hydraulic Press",
            serial: "HYD-552",
            category: "Heavy Machinery",
            company: "Factory Floor B",
            location: "Main Bay",
            work_center: "WC-02",
            health: 65,
            open: 1,
            technician: "tech1",
            team: "1",
        },
    ];

    rows.into_iter()
        .map(|row| Equipment {
            id: EquipmentId::new(row.id),
            name: row.name.to_string(),
            serial_number: row.serial.to_string(),
            category: row.category.to_string(),
            company: row.company.to_string(),
            location: row.location.to_string(),
            work_center: row.work_center.to_string(),
            health: Health::saturating(row.health),
            status: EquipmentStatus::Active,
            open_request_count: row.open,
            technician_id: UserId::new(row.technician),
            team_id: TeamId::new(row.team),
        })
        .collect()
}

/// Seeded requests, in listing order.
#[must_use]
pub fn requests() -> Vec<MaintenanceRequest> {
    vec![
        request(
            "1",
            "A/C Unit Failure Room 402",
            ("req1", "1", "1"),
            "HVAC",
            date(2025, 10, 12),
            (
                MaintenanceType::Corrective,
                Priority::High,
                MaintenanceStatus::New,
            ),
        ),
        request(
            "2",
            "Leaking Pipe in Canteen",
            ("req2", "2", "3"),
            "Plumbing",
            date(2025, 10, 15),
            (
                MaintenanceType::Corrective,
                Priority::Medium,
                MaintenanceStatus::InProgress,
            ),
        ),
        request(
            "3",
            "Annual Calibration WC-01",
            ("admin1", "1", "1"),
            "Heavy Machinery",
            date(2025, 10, 18),
            (
                MaintenanceType::Preventive,
                Priority::Low,
                MaintenanceStatus::Repaired,
            ),
        ),
    ]
}

/// `(requester, equipment, team)` references of a seeded request.
type References = (&'static str, &'static str, &'static str);

fn request(
    id: &str,
    subject: &str,
    (requester, equipment, team): References,
    category: &str,
    assigned_date: NaiveDate,
    (maintenance_type, priority, status): (MaintenanceType, Priority, MaintenanceStatus),
) -> MaintenanceRequest {
    MaintenanceRequest {
        id: RequestId::new(id),
        subject: subject.to_string(),
        requester_id: UserId::new(requester),
        equipment_id: EquipmentId::new(equipment),
        category: category.to_string(),
        assigned_date,
        maintenance_type,
        team_id: TeamId::new(team),
        priority,
        status,
        notes: None,
    }
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid calendar dates")
}
