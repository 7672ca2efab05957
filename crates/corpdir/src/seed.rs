//! Bundled default directory used on first run.

use crate::employee::NewEmployee;

struct SeedRow {
    name: &'static str,
    job_title: &'static str,
    branch: &'static str,
    email: &'static str,
    telephone: &'static str,
    ext: &'static str,
    fax: &'static str,
    cell_phone: &'static str,
}

const SEED: &[SeedRow] = &[
    SeedRow {
        name: "Margaret Hood",
        job_title: "President",
        branch: "Corporate",
        email: "mhood@hooddistribution.com",
        telephone: "(601) 555-0100",
        ext: "100",
        fax: "(601) 555-0199",
        cell_phone: "(601) 555-0150",
    },
    SeedRow {
        name: "Thomas Reed",
        job_title: "Chief Financial Officer",
        branch: "Corporate",
        email: "treed@hooddistribution.com",
        telephone: "(601) 555-0100",
        ext: "104",
        fax: "(601) 555-0199",
        cell_phone: "",
    },
    SeedRow {
        name: "Angela Martinez",
        job_title: "Branch Manager",
        branch: "Jackson",
        email: "amartinez@hooddistribution.com",
        telephone: "(601) 555-0120",
        ext: "201",
        fax: "(601) 555-0129",
        cell_phone: "(601) 555-0171",
    },
    SeedRow {
        name: "Derrick Collins",
        job_title: "Inside Sales",
        branch: "Jackson",
        email: "dcollins@hooddistribution.com",
        telephone: "(601) 555-0120",
        ext: "214",
        fax: "",
        cell_phone: "",
    },
    SeedRow {
        name: "Priya Natarajan",
        job_title: "Branch Manager",
        branch: "Hattiesburg",
        email: "pnatarajan@hooddistribution.com",
        telephone: "(601) 555-0140",
        ext: "301",
        fax: "(601) 555-0149",
        cell_phone: "(601) 555-0172",
    },
    SeedRow {
        name: "Luis Ortega",
        job_title: "Warehouse Supervisor",
        branch: "Hattiesburg",
        email: "lortega@hooddistribution.com",
        telephone: "(601) 555-0140",
        ext: "322",
        fax: "",
        cell_phone: "(601) 555-0173",
    },
    SeedRow {
        name: "Karen Whitfield",
        job_title: "Branch Manager",
        branch: "Meridian",
        email: "kwhitfield@hooddistribution.com",
        telephone: "(601) 555-0160",
        ext: "401",
        fax: "(601) 555-0169",
        cell_phone: "",
    },
    SeedRow {
        name: "Samuel Brooks",
        job_title: "Outside Sales",
        branch: "Meridian",
        email: "sbrooks@hooddistribution.com",
        telephone: "(601) 555-0160",
        ext: "",
        fax: "",
        cell_phone: "(601) 555-0174",
    },
];

fn field(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// The default employees, in directory order.
#[must_use]
pub fn default_employees() -> Vec<NewEmployee> {
    SEED.iter()
        .map(|row| NewEmployee {
            name: row.name.to_string(),
            telephone: field(row.telephone),
            ext: field(row.ext),
            fax: field(row.fax),
            email: field(row.email),
            cell_phone: field(row.cell_phone),
            home_phone: None,
            job_title: field(row.job_title),
            branch: field(row.branch),
            photo: None,
        })
        .collect()
}
