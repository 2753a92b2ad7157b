use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分取值范围
pub const CRITERIA_MIN: i32 = 1;
pub const CRITERIA_MAX: i32 = 5;

// 评价活动状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum EvaluationStatus {
    Active, // 收集中
    Closed, // 已关闭
}

impl<'de> Deserialize<'de> for EvaluationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(EvaluationStatus::Active),
            "closed" => Ok(EvaluationStatus::Closed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的评价状态: '{s}'. 支持的状态: active, closed"
            ))),
        }
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationStatus::Active => write!(f, "active"),
            EvaluationStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for EvaluationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EvaluationStatus::Active),
            "closed" => Ok(EvaluationStatus::Closed),
            _ => Err(format!("Invalid evaluation status: {s}")),
        }
    }
}

// 评价活动实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: EvaluationStatus,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Evaluation {
    /// 判断评价活动在指定时刻是否接受回复
    ///
    /// 纯谓词：状态为 active 且 start_date <= now <= end_date。
    /// 验证访问码与提交回复两个路径都要调用，窗口可能在两次调用之间关闭。
    pub fn is_accepting_responses(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.status == EvaluationStatus::Active && self.start_date <= now && now <= self.end_date
    }
}

// 五项固定评分，每项取值 1-5
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct CriteriaScores {
    pub preparation: i32, // 备课充分程度
    pub explanation: i32, // 讲解清晰程度
    pub engagement: i32,  // 学生参与度
    pub atmosphere: i32,  // 课堂氛围
    pub individual: i32,  // 个别辅导
}

impl CriteriaScores {
    /// 按固定顺序返回 (名称, 分值) 对，统计与导出共用
    pub fn as_pairs(&self) -> [(&'static str, i32); 5] {
        [
            ("preparation", self.preparation),
            ("explanation", self.explanation),
            ("engagement", self.engagement),
            ("atmosphere", self.atmosphere),
            ("individual", self.individual),
        ]
    }

    /// 校验全部评分都落在 1-5 范围内
    ///
    /// 必须在打开任何事务之前调用。
    pub fn validate(&self) -> Result<(), String> {
        for (name, score) in self.as_pairs() {
            if !(CRITERIA_MIN..=CRITERIA_MAX).contains(&score) {
                return Err(format!(
                    "Criterion '{name}' must be between {CRITERIA_MIN} and {CRITERIA_MAX}, got {score}"
                ));
            }
        }
        Ok(())
    }
}

// 单条匿名评价回复
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationResponse {
    pub id: i64,
    pub evaluation_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub access_code_id: i64,
    pub criteria: CriteriaScores,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_evaluation(status: EvaluationStatus) -> Evaluation {
        Evaluation {
            id: 1,
            school_id: 1,
            name: "2024 Winter".to_string(),
            description: None,
            status,
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_window_open_inside_range() {
        let eval = sample_evaluation(EvaluationStatus::Active);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert!(eval.is_accepting_responses(now));
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        let eval = sample_evaluation(EvaluationStatus::Active);
        assert!(eval.is_accepting_responses(eval.start_date));
        assert!(eval.is_accepting_responses(eval.end_date));
    }

    #[test]
    fn test_window_closed_outside_range() {
        let eval = sample_evaluation(EvaluationStatus::Active);
        let before = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert!(!eval.is_accepting_responses(before));
        assert!(!eval.is_accepting_responses(after));
    }

    #[test]
    fn test_window_closed_when_status_closed() {
        let eval = sample_evaluation(EvaluationStatus::Closed);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert!(!eval.is_accepting_responses(now));
    }

    #[test]
    fn test_criteria_valid_scores() {
        let criteria = CriteriaScores {
            preparation: 5,
            explanation: 4,
            engagement: 4,
            atmosphere: 5,
            individual: 3,
        };
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_criteria_rejects_out_of_range() {
        let mut criteria = CriteriaScores {
            preparation: 1,
            explanation: 1,
            engagement: 1,
            atmosphere: 1,
            individual: 1,
        };
        criteria.engagement = 0;
        assert!(criteria.validate().is_err());

        criteria.engagement = 6;
        let err = criteria.validate().unwrap_err();
        assert!(err.contains("engagement"));
    }

    #[test]
    fn test_criteria_default_is_invalid() {
        // 默认值全 0，必须被校验拒绝
        assert!(CriteriaScores::default().validate().is_err());
    }
}
