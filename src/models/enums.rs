use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Macro to generate a closed enum with as_str + std::str::FromStr + ALL.
/// The string form is also the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(MetricType {
    Glucose => "glucose",
    FastingGlucose => "fastingGlucose",
    RandomGlucose => "randomGlucose",
    Hba1c => "hba1c",
    TotalCholesterol => "totalCholesterol",
    HdlCholesterol => "hdlCholesterol",
    LdlCholesterol => "ldlCholesterol",
    VldlCholesterol => "vldlCholesterol",
    Triglycerides => "triglycerides",
    Tsh => "tsh",
    T3 => "t3",
    FreeT3 => "freeT3",
    T4 => "t4",
    FreeT4 => "freeT4",
    VitaminD => "vitaminD",
    VitaminB12 => "vitaminB12",
    Hemoglobin => "hemoglobin",
    Wbc => "wbc",
    Platelets => "platelets",
    Creatinine => "creatinine",
    Urea => "urea",
    BloodPressure => "bloodPressure",
    Weight => "weight",
    Height => "height",
    HeartRate => "heartRate",
    Temperature => "temperature",
    Bmi => "bmi",
    // Legacy aliases kept for records created before the per-analyte types.
    BloodSugar => "bloodSugar",
    Cholesterol => "cholesterol",
});

str_enum!(MetricSource {
    Manual => "manual",
    PdfExtraction => "pdf_extraction",
});

str_enum!(HealthStatus {
    Normal => "Normal",
    Low => "Low",
    High => "High",
    Abnormal => "Abnormal",
    Unknown => "Unknown",
});

str_enum!(ExtractionStatus {
    Success => "success",
    NoData => "no_data",
    Error => "error",
    Rejected => "rejected",
});

str_enum!(InsightLevel {
    Success => "success",
    Info => "info",
    Warning => "warning",
    Alert => "alert",
});

str_enum!(BmiCategory {
    Underweight => "Underweight",
    NormalWeight => "Normal weight",
    Overweight => "Overweight",
    Obese => "Obese",
});

str_enum!(TrendDirection {
    Up => "up",
    Down => "down",
    Neutral => "neutral",
});

str_enum!(ExportFormat {
    Csv => "csv",
    Json => "json",
    Text => "txt",
});

impl MetricType {
    /// Legacy tags that predate the per-analyte types.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::BloodSugar | Self::Cholesterol)
    }
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl HealthStatus {
    /// Anything other than Normal or Unknown.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::Low | Self::High | Self::Abnormal)
    }
}
