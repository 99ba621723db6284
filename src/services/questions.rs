use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    VisualChoice,
    Scenario,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: &'static str,
    pub image_url: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: &'static str,
    pub options: Vec<QuestionOption>,
}

fn question(
    id: u32,
    kind: QuestionKind,
    text: &'static str,
    options: [(&'static str, &'static str); 4],
) -> Question {
    let options = ["a", "b", "c", "d"]
        .into_iter()
        .zip(options)
        .map(|(option_id, (image, label))| QuestionOption {
            id: option_id,
            image_url: format!("/images/psychometric/{image}.jpg"),
            label,
        })
        .collect();

    Question { id, kind, question: text, options }
}

/// The fixed entrepreneurial-aptitude questionnaire.
pub fn questions() -> Vec<Question> {
    use QuestionKind::*;

    vec![
        question(
            1,
            VisualChoice,
            "Which image best represents how you approach challenges?",
            [
                ("challenge_methodical", "Methodical approach"),
                ("challenge_creative", "Creative approach"),
                ("challenge_collaborative", "Collaborative approach"),
                ("challenge_instinctive", "Instinctive approach"),
            ],
        ),
        question(
            2,
            Scenario,
            "In a business setting with limited resources, which path would you choose?",
            [
                ("business_innovative", "Find an innovative workaround"),
                ("business_methodical", "Carefully allocate existing resources"),
                ("business_partnership", "Seek partnerships to pool resources"),
                ("business_pivot", "Pivot to a less resource-intensive approach"),
            ],
        ),
        question(
            3,
            VisualChoice,
            "Which workspace environment would you be most productive in?",
            [
                ("workspace_organized", "Organized and structured"),
                ("workspace_creative", "Creative and stimulating"),
                ("workspace_collaborative", "Open and collaborative"),
                ("workspace_minimal", "Minimal and focused"),
            ],
        ),
        question(
            4,
            Scenario,
            "When faced with a new market opportunity, how would you respond?",
            [
                ("opportunity_research", "Conduct extensive research"),
                ("opportunity_quick", "Move quickly to capture market share"),
                ("opportunity_cautious", "Test the waters with minimal investment"),
                ("opportunity_partners", "Find partners with complementary strengths"),
            ],
        ),
        question(
            5,
            VisualChoice,
            "Which image best represents your approach to financial management?",
            [
                ("finance_growth", "Focus on growth"),
                ("finance_balance", "Balanced approach"),
                ("finance_conservative", "Conservative and careful"),
                ("finance_innovative", "Innovative funding methods"),
            ],
        ),
    ]
}
