//! Plain-text notices. Email and print share one body; email adds a header.

use std::fmt;

use crate::model::{Channel, ElectricityRecord, Member, NotificationTarget};

pub const EMAIL_SUBJECT: &str = "Electricity reconciliation";

/// The period's balance: owed when the offset is positive, refunded otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Due(u64),
    Refund(u64),
}

impl Adjustment {
    pub fn from_offset(offset: i64) -> Self {
        if offset > 0 {
            Self::Due(offset.unsigned_abs())
        } else {
            Self::Refund(offset.unsigned_abs())
        }
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Due(n) => write!(f, "additional payment due: {n} kr"),
            Self::Refund(n) => write!(f, "refund: {n} kr"),
        }
    }
}

/// Price with a decimal comma and at least two decimals, e.g. `2,34` or `0,875`.
/// Never rounded: the notice shows the price as billed.
pub fn format_price(price: f64) -> String {
    let text = price.to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    format!("{whole},{frac:0<2}")
}

pub fn render(target: &NotificationTarget) -> String {
    render_notice(&target.recipient, &target.record, target.channel)
}

pub fn render_notice(member: &Member, record: &ElectricityRecord, channel: Channel) -> String {
    let mut lines: Vec<String> = Vec::new();

    if channel == Channel::Email {
        lines.push(format!("To: {}", member.email.as_deref().unwrap_or_default()));
        lines.push(format!("Subject: {EMAIL_SUBJECT}"));
        lines.push(String::new());
    }

    lines.push(format!("Hello {},", member.name.given));
    lines.push(String::new());
    lines.push(format!(
        "Here is the electricity reconciliation for apartment {}.",
        record.apartment
    ));
    lines.push(String::new());
    lines.push(format!("Consumption: {} kWh", record.consumption));
    lines.push(format!("Price: {} kr/kWh", format_price(record.price)));
    lines.push(format!("Paid on account: {} kr", record.paid_sum));
    lines.push(format!(
        "Balance for the period, {}",
        Adjustment::from_offset(record.offset)
    ));
    lines.push(String::new());
    lines.push("Kind regards,".into());
    lines.push("The board".into());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
