//! Column names of the dog registry, in source (German) and normalized
//! (English) form.

/// Normalized owner identifier column.
pub const OWNER_ID: &str = "Owner_ID";
/// Normalized owner age range column.
pub const AGE: &str = "Age";
/// Normalized owner gender column.
pub const GENDER: &str = "Gender";
/// Normalized city district column.
pub const CITY_DISTRICT: &str = "City_District";
/// Normalized city quarter column.
pub const CITY_QUARTER: &str = "City_Quarter";
/// Normalized primary breed column.
pub const BREED1: &str = "Breed1";
/// Normalized primary breed mix flag column.
pub const BREED1_MIX: &str = "Breed1_Mix";
/// Normalized secondary breed column.
pub const BREED2: &str = "Breed2";
/// Normalized secondary breed mix flag column.
pub const BREED2_MIX: &str = "Breed2_Mix";
/// Normalized breed type column.
pub const BREED_TYPE: &str = "Breed_Type";
/// Normalized dog birth year column.
pub const DOG_BIRTH_YEAR: &str = "Dog_Birth_Year";
/// Normalized dog gender column.
pub const DOG_GENDER: &str = "Dog_Gender";
/// Normalized dog color column.
pub const DOG_COLOR: &str = "Dog_Color";
/// Derived owner age bucket column.
pub const AGE_GROUP: &str = "Age_Group";

/// Source header to normalized header. Headers not listed here keep their
/// source name.
pub const RENAMES: &[(&str, &str)] = &[
    ("HALTER_ID", OWNER_ID),
    ("ALTER", AGE),
    ("GESCHLECHT", GENDER),
    ("STADTKREIS", CITY_DISTRICT),
    ("STADTQUARTIER", CITY_QUARTER),
    ("RASSE1", BREED1),
    ("RASSE1_MISCHLING", BREED1_MIX),
    ("RASSE2", BREED2),
    ("RASSE2_MISCHLING", BREED2_MIX),
    ("RASSENTYP", BREED_TYPE),
    ("GEBURTSJAHR_HUND", DOG_BIRTH_YEAR),
    ("GESCHLECHT_HUND", DOG_GENDER),
    ("HUNDEFARBE", DOG_COLOR),
];

/// Every normalized column a [`crate::DogRecord`] exposes, in table order.
pub const NORMALIZED: &[&str] = &[
    OWNER_ID,
    AGE,
    GENDER,
    CITY_DISTRICT,
    CITY_QUARTER,
    BREED1,
    BREED1_MIX,
    BREED2,
    BREED2_MIX,
    BREED_TYPE,
    DOG_BIRTH_YEAR,
    DOG_GENDER,
    DOG_COLOR,
    AGE_GROUP,
];

/// Columns shown in the filtered data table.
pub const FILTERED_TABLE: &[&str] = &[
    AGE_GROUP,
    GENDER,
    CITY_DISTRICT,
    CITY_QUARTER,
    BREED1,
    BREED_TYPE,
];

/// Returns the normalized name for a source header, or the header itself if
/// it has no mapping.
#[must_use]
pub fn normalized_name(source: &str) -> &str {
    RENAMES
        .iter()
        .find(|(from, _)| *from == source)
        .map_or(source, |(_, to)| to)
}
