use std::fmt;

/// The facility's duty types. A closed set: changing it is a data migration,
/// not a configuration edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftCode {
    EA,
    DA,
    DB,
    LA,
    NA,
    NB,
    NC,
}

impl ShiftCode {
    /// Catalogue order. All per-shift iteration uses this order so output is
    /// deterministic for a given input.
    pub const ALL: [ShiftCode; 7] = [
        ShiftCode::EA,
        ShiftCode::DA,
        ShiftCode::DB,
        ShiftCode::LA,
        ShiftCode::NA,
        ShiftCode::NB,
        ShiftCode::NC,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftCode::EA => "EA",
            ShiftCode::DA => "DA",
            ShiftCode::DB => "DB",
            ShiftCode::LA => "LA",
            ShiftCode::NA => "NA",
            ShiftCode::NB => "NB",
            ShiftCode::NC => "NC",
        }
    }

    pub fn parse(code: &str) -> Option<ShiftCode> {
        ShiftCode::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    pub fn catalogue_index(self) -> usize {
        ShiftCode::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn is_night(self) -> bool {
        matches!(self, ShiftCode::NA | ShiftCode::NB | ShiftCode::NC)
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalogue row: hour-of-day span plus a display name. `end < start`
/// signals a shift that wraps past midnight.
#[derive(Debug, Clone, Copy)]
pub struct ShiftDef {
    pub code: ShiftCode,
    pub name: &'static str,
    pub start: u32,
    pub end: u32,
}

pub const CATALOGUE: [ShiftDef; 7] = [
    ShiftDef { code: ShiftCode::EA, name: "early", start: 7, end: 15 },
    ShiftDef { code: ShiftCode::DA, name: "day A", start: 9, end: 17 },
    ShiftDef { code: ShiftCode::DB, name: "day B", start: 9, end: 18 },
    ShiftDef { code: ShiftCode::LA, name: "late", start: 15, end: 21 },
    ShiftDef { code: ShiftCode::NA, name: "night (long)", start: 16, end: 9 },
    ShiftDef { code: ShiftCode::NB, name: "night", start: 21, end: 6 },
    ShiftDef { code: ShiftCode::NC, name: "night (short)", start: 22, end: 7 },
];

pub fn shift_def(code: ShiftCode) -> &'static ShiftDef {
    &CATALOGUE[code.catalogue_index()]
}

impl ShiftDef {
    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this shift's hour interval overlaps the slot's interval.
    /// Wrapped shifts are extended past hour 24, matching the dawn slot's
    /// 24..31 interval.
    pub fn covers(&self, slot: Slot) -> bool {
        let (a, b) = slot.hours();
        let start = self.start;
        let end = if self.wraps_midnight() { self.end + 24 } else { self.end };
        !(end <= a || b <= start)
    }
}

/// The six demand slots of a day, in summary order. The dawn slot belongs to
/// the date whose morning it is; it is staffed by the previous evening's
/// night shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Morning,
    Daytime,
    Afternoon,
    Evening,
    LateEvening,
    Dawn,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Morning,
        Slot::Daytime,
        Slot::Afternoon,
        Slot::Evening,
        Slot::LateEvening,
        Slot::Dawn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Slot::Morning => "7-9",
            Slot::Daytime => "9-15",
            Slot::Afternoon => "16-18",
            Slot::Evening => "18-21",
            Slot::LateEvening => "21-23",
            Slot::Dawn => "0-7",
        }
    }

    pub fn parse(label: &str) -> Option<Slot> {
        Slot::ALL.iter().copied().find(|s| s.label() == label)
    }

    pub fn index(self) -> usize {
        Slot::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Hour interval of the slot. Dawn maps to 24..31 so that wrapped night
    /// shifts overlap it.
    pub fn hours(self) -> (u32, u32) {
        match self {
            Slot::Morning => (7, 9),
            Slot::Daytime => (9, 15),
            Slot::Afternoon => (16, 18),
            Slot::Evening => (18, 21),
            Slot::LateEvening => (21, 23),
            Slot::Dawn => (24, 31),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
