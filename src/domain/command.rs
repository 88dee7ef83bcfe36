use super::item::{Day, ItemId};
use super::money::Money;
use super::patron::PatronId;
use crate::error::LibraryError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::fmt;

/// Largest day count a single `advance_day` command may ask for (ten years).
pub const MAX_DAYS_PER_COMMAND: Day = 3650;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    CheckOut,
    Return,
    Request,
    PayFine,
    AdvanceDay,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::CheckOut => "check_out",
            CommandType::Return => "return",
            CommandType::Request => "request",
            CommandType::PayFine => "pay_fine",
            CommandType::AdvanceDay => "advance_day",
        };
        f.write_str(name)
    }
}

/// One row of a command script, as read from CSV.
///
/// Columns a command does not use are left empty. `amount` is the payment for
/// `pay_fine` and the number of days for `advance_day`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub r#type: CommandType,
    pub patron: Option<PatronId>,
    pub item: Option<ItemId>,
    pub amount: Option<Decimal>,
}

/// A validated circulation request, ready to hand to the library.
#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    CheckOut { patron: PatronId, item: ItemId },
    Return { item: ItemId },
    Request { patron: PatronId, item: ItemId },
    PayFine { patron: PatronId, amount: Money },
    AdvanceDay { days: Day },
}

fn required<T>(value: Option<T>, column: &str, command: CommandType) -> Result<T, LibraryError> {
    value.ok_or_else(|| {
        LibraryError::ValidationError(format!("{command} is missing the {column} column"))
    })
}

impl TryFrom<Command> for Operation {
    type Error = LibraryError;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        let kind = command.r#type;
        match kind {
            CommandType::CheckOut => Ok(Operation::CheckOut {
                patron: required(command.patron, "patron", kind)?,
                item: required(command.item, "item", kind)?,
            }),
            CommandType::Return => Ok(Operation::Return {
                item: required(command.item, "item", kind)?,
            }),
            CommandType::Request => Ok(Operation::Request {
                patron: required(command.patron, "patron", kind)?,
                item: required(command.item, "item", kind)?,
            }),
            CommandType::PayFine => Ok(Operation::PayFine {
                patron: required(command.patron, "patron", kind)?,
                amount: Money::new(required(command.amount, "amount", kind)?),
            }),
            CommandType::AdvanceDay => {
                let days = match command.amount {
                    None => 1,
                    Some(days) if days.fract().is_zero() => days
                        .to_u32()
                        .filter(|days| *days <= MAX_DAYS_PER_COMMAND)
                        .ok_or_else(|| {
                            LibraryError::ValidationError(format!(
                                "Day count must be between 0 and {MAX_DAYS_PER_COMMAND}, got {days}"
                            ))
                        })?,
                    Some(days) => {
                        return Err(LibraryError::ValidationError(format!(
                            "Day count must be a whole number, got {days}"
                        )));
                    }
                };
                Ok(Operation::AdvanceDay { days })
            }
        }
    }
}
