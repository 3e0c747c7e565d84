//! The canonical job-posting record produced by one extraction call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One named field of a [`Record`].
///
/// Variant order is the serialization order of [`Record`]; [`Field::ALL`]
/// lists them in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Price,
    Area,
    Access,
    Address,
    City,
    Prefecture,
    Contract,
    Dept,
    Detail,
    FacilityName,
    FacilityType,
    Holiday,
    License,
    Occupation,
    Position,
    RequiredSkill,
    StaffComment,
    Station,
    WelfareProgram,
    WorkingHours,
    WorkingStyle,
    TitleOriginal,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::Name,
        Field::Price,
        Field::Area,
        Field::Access,
        Field::Address,
        Field::City,
        Field::Prefecture,
        Field::Contract,
        Field::Dept,
        Field::Detail,
        Field::FacilityName,
        Field::FacilityType,
        Field::Holiday,
        Field::License,
        Field::Occupation,
        Field::Position,
        Field::RequiredSkill,
        Field::StaffComment,
        Field::Station,
        Field::WelfareProgram,
        Field::WorkingHours,
        Field::WorkingStyle,
        Field::TitleOriginal,
    ];

    /// The JSON key used for this field in records and site configs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Area => "area",
            Field::Access => "access",
            Field::Address => "address",
            Field::City => "city",
            Field::Prefecture => "prefecture",
            Field::Contract => "contract",
            Field::Dept => "dept",
            Field::Detail => "detail",
            Field::FacilityName => "facility_name",
            Field::FacilityType => "facility_type",
            Field::Holiday => "holiday",
            Field::License => "license",
            Field::Occupation => "occupation",
            Field::Position => "position",
            Field::RequiredSkill => "required_skill",
            Field::StaffComment => "staff_comment",
            Field::Station => "station",
            Field::WelfareProgram => "welfare_program",
            Field::WorkingHours => "working_hours",
            Field::WorkingStyle => "working_style",
            Field::TitleOriginal => "title_original",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown record field: \"{0}\"")]
pub struct UnknownFieldError(pub String);

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// Flat job-posting record. Every field defaults to the empty string, which
/// is how absence is represented; fields are never null or omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub name: String,
    pub price: String,
    pub area: String,
    pub access: String,
    pub address: String,
    pub city: String,
    pub prefecture: String,
    pub contract: String,
    pub dept: String,
    pub detail: String,
    pub facility_name: String,
    pub facility_type: String,
    pub holiday: String,
    pub license: String,
    pub occupation: String,
    pub position: String,
    pub required_skill: String,
    pub staff_comment: String,
    pub station: String,
    pub welfare_program: String,
    pub working_hours: String,
    pub working_style: String,
    pub title_original: String,
}

impl Record {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Area => &self.area,
            Field::Access => &self.access,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::Prefecture => &self.prefecture,
            Field::Contract => &self.contract,
            Field::Dept => &self.dept,
            Field::Detail => &self.detail,
            Field::FacilityName => &self.facility_name,
            Field::FacilityType => &self.facility_type,
            Field::Holiday => &self.holiday,
            Field::License => &self.license,
            Field::Occupation => &self.occupation,
            Field::Position => &self.position,
            Field::RequiredSkill => &self.required_skill,
            Field::StaffComment => &self.staff_comment,
            Field::Station => &self.station,
            Field::WelfareProgram => &self.welfare_program,
            Field::WorkingHours => &self.working_hours,
            Field::WorkingStyle => &self.working_style,
            Field::TitleOriginal => &self.title_original,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Price => &mut self.price,
            Field::Area => &mut self.area,
            Field::Access => &mut self.access,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::Prefecture => &mut self.prefecture,
            Field::Contract => &mut self.contract,
            Field::Dept => &mut self.dept,
            Field::Detail => &mut self.detail,
            Field::FacilityName => &mut self.facility_name,
            Field::FacilityType => &mut self.facility_type,
            Field::Holiday => &mut self.holiday,
            Field::License => &mut self.license,
            Field::Occupation => &mut self.occupation,
            Field::Position => &mut self.position,
            Field::RequiredSkill => &mut self.required_skill,
            Field::StaffComment => &mut self.staff_comment,
            Field::Station => &mut self.station,
            Field::WelfareProgram => &mut self.welfare_program,
            Field::WorkingHours => &mut self.working_hours,
            Field::WorkingStyle => &mut self.working_style,
            Field::TitleOriginal => &mut self.title_original,
        }
    }

    /// Unconditionally replaces the value of `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Sets `field` only when it is currently empty and `value` is not.
    ///
    /// Returns `true` when the record changed.
    pub fn fill(&mut self, field: Field, value: &str) -> bool {
        let slot = self.slot(field);
        if slot.is_empty() && !value.is_empty() {
            value.clone_into(slot);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_set(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// `(field, value)` pairs in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// `true` when every field is the empty string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.iter().all(|(_, value)| value.is_empty())
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
