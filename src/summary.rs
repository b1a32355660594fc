//! Display/export-ready bill summaries.
//!
//! The summary is a pure projection of the aggregator's output joined with
//! each person's display data. It is the only structure the export
//! collaborator sees, which guarantees exported output matches on-screen
//! totals. Amounts are dimensionless; currency formatting belongs to the UI.

use crate::aggregate::{self, ChargeLine, ItemShare};
use crate::bill::{Bill, ChargeMethod, PersonId};
use crate::error::Result;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One person's entry in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    /// Person id.
    pub id: PersonId,

    /// Display name.
    pub name: String,

    /// Avatar glyph.
    pub icon: String,

    /// Per-item contribution lines.
    pub items: Vec<ItemShare>,

    /// Sum of the item contributions.
    pub regular_total: Money,

    /// Equal share of all special charges.
    pub charges_share: Money,

    /// What this person owes in total.
    pub total: Money,
}

/// A serializable summary of a whole bill.
///
/// Stable under re-serialization: serializing to JSON and parsing back yields
/// a value-identical structure, so exports can round-trip through text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Id of the bill this was derived from.
    pub bill_id: String,

    /// Bill display name.
    pub name: String,

    /// Sum of line item amounts.
    pub subtotal: Money,

    /// Resolved charges with their calculated amounts.
    pub charges: Vec<ChargeLine>,

    /// Sum of all charge amounts.
    pub charges_total: Money,

    /// Grand total.
    pub total: Money,

    /// Per-person entries, in bill people order.
    pub people: Vec<PersonSummary>,
}

/// Builds the summary for a bill.
///
/// # Errors
///
/// Propagates aggregation errors (see [`aggregate::aggregate`]).
pub fn build_summary(bill: &Bill) -> Result<BillSummary> {
    let mut totals = aggregate::aggregate(bill)?;

    let people = bill
        .people
        .iter()
        .map(|person| {
            // Every bill person has an entry; remove() hands it over without
            // cloning the item lines.
            let person_total = totals.per_person.remove(&person.id).unwrap_or_default();
            PersonSummary {
                id: person.id.clone(),
                name: person.name.clone(),
                icon: person.icon.clone(),
                items: person_total.items,
                regular_total: person_total.regular_total,
                charges_share: person_total.charges_share,
                total: person_total.total,
            }
        })
        .collect();

    Ok(BillSummary {
        bill_id: bill.id.clone(),
        name: bill.name.clone(),
        subtotal: totals.subtotal,
        charges: totals.charges,
        charges_total: totals.charges_total,
        total: totals.total,
        people,
    })
}

impl BillSummary {
    /// Renders the summary as plain shareable text.
    ///
    /// Header, subtotal, one line per charge, total, then a per-person
    /// breakdown with indented item and charge lines.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Bill Summary - {}", self.name);
        let _ = writeln!(out);
        let _ = writeln!(out, "Subtotal: {}", self.subtotal);
        for charge in &self.charges {
            let nominal = match charge.method {
                ChargeMethod::Percentage => format!("{}%", charge.value),
                ChargeMethod::Fixed => charge.value.to_string(),
            };
            let _ = writeln!(
                out,
                "{} ({}): {}",
                charge.kind.label(),
                nominal,
                charge.amount
            );
        }
        let _ = writeln!(out, "Total: {}", self.total);
        let _ = writeln!(out);
        let _ = writeln!(out, "Breakdown:");
        for person in &self.people {
            let _ = writeln!(out, "{}: {}", person.name, person.total);
            for item in &person.items {
                let _ = writeln!(out, "  {}: {}", item.name, item.amount);
            }
            for charge in &self.charges {
                let _ = writeln!(
                    out,
                    "  {}: {}",
                    charge.kind.label(),
                    charge.per_person_share
                );
            }
        }

        out
    }
}
