//! 레시피 재료의 계량 단위
//!
//! 저장과 전송에는 짧은 코드(`"evk"`)를, 화면 표시에는 라벨(`"Evőkanál"`)을 씁니다.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Ml,
    Kg,
    #[default]
    Db,
    G,
    L,
    Tk,
    Evk,
    Csipet,
}

impl Unit {
    pub const ALL: [Unit; 8] = [
        Unit::Ml,
        Unit::Kg,
        Unit::Db,
        Unit::G,
        Unit::L,
        Unit::Tk,
        Unit::Evk,
        Unit::Csipet,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Unit::Ml => "ml",
            Unit::Kg => "kg",
            Unit::Db => "db",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Tk => "tk",
            Unit::Evk => "evk",
            Unit::Csipet => "csipet",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Ml => "Milliliter",
            Unit::Kg => "Kilogram",
            Unit::Db => "Darab",
            Unit::G => "Gram",
            Unit::L => "Liter",
            Unit::Tk => "Teáskanál",
            Unit::Evk => "Evőkanál",
            Unit::Csipet => "Csipet",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.code() == code)
            .ok_or_else(|| AppError::ValidationError(format!("알 수 없는 단위입니다: {}", s)))
    }
}
