//! Search and filtering over the directory.
//!
//! Matching is case-insensitive substring containment over a fixed set of
//! fields. Results keep the collection's order.

use std::collections::BTreeSet;

use crate::employee::{present, Employee};

/// Whether `employee` matches an already lower-cased, non-empty query.
fn matches(employee: &Employee, query: &str) -> bool {
    let fields = [
        Some(employee.name.as_str()),
        present(employee.email.as_ref()),
        present(employee.job_title.as_ref()),
        present(employee.branch.as_ref()),
        present(employee.telephone.as_ref()),
        present(employee.cell_phone.as_ref()),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
}

/// Return the records matching `query`, in collection order.
///
/// A blank query returns every record. Otherwise a record is kept when its
/// name, email, job title, branch, telephone or cell phone contains the query,
/// ignoring case.
#[must_use]
pub fn filter<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    if query.trim().is_empty() {
        return employees.iter().collect();
    }

    let query = query.to_lowercase();
    employees.iter().filter(|e| matches(e, &query)).collect()
}

/// Non-blank branch names across the collection, sorted and de-duplicated.
#[must_use]
pub fn distinct_branches(employees: &[Employee]) -> Vec<String> {
    employees
        .iter()
        .filter_map(Employee::branch)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The results count line, e.g. `Showing 2 of 8 employees`.
#[must_use]
pub fn summary(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} employees")
}

/// The message shown when nothing matches `query`.
#[must_use]
pub fn no_results_message(query: &str) -> String {
    format!("No employees found matching \"{query}\"")
}
