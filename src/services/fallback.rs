use super::gateway::PsychometricResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceTopic {
    Budget,
    Saving,
    Debt,
    Investing,
    Emergency,
    General,
}

// First match wins, so "saving for an emergency" is a Saving question.
pub fn detect_topic(msg: &str) -> AdviceTopic {
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("budget") {
        AdviceTopic::Budget
    } else if msg_lower.contains("save") || msg_lower.contains("saving") {
        AdviceTopic::Saving
    } else if msg_lower.contains("debt") {
        AdviceTopic::Debt
    } else if msg_lower.contains("invest") {
        AdviceTopic::Investing
    } else if msg_lower.contains("emergency") {
        AdviceTopic::Emergency
    } else {
        AdviceTopic::General
    }
}

pub fn canned_reply(topic: AdviceTopic) -> &'static str {
    use AdviceTopic::*;

    match topic {
        Budget => {
            "Creating a budget is simple! Start by tracking your income and expenses for a month. Then, categorize your expenses (housing, food, transportation, etc.) and set spending limits for each category. Aim to save at least 10% of your income if possible. Review and adjust your budget regularly."
        }
        Saving => {
            "To save money with a low income, try these tips: 1) Track every expense, 2) Cut unnecessary subscriptions, 3) Use cash instead of cards to be more mindful of spending, 4) Cook at home instead of eating out, 5) Look for free entertainment options, 6) Consider a side hustle for extra income."
        }
        Debt => {
            "To manage debt effectively: 1) List all your debts with interest rates, 2) Pay minimum payments on all debts, 3) Put extra money toward the highest-interest debt first, 4) Consider debt consolidation if you have good credit, 5) Contact creditors to negotiate lower rates, 6) Create a budget to avoid taking on more debt."
        }
        Investing => {
            "Start investing with little money by: 1) Using micro-investing apps like Acorns or Stash, 2) Contributing to an employer-matched retirement plan if available, 3) Looking into low-cost index funds with low minimum investments, 4) Setting up automatic transfers of small amounts regularly, 5) Reinvesting any dividends you earn."
        }
        Emergency => {
            "An emergency fund is money set aside for unexpected expenses like medical bills, car repairs, or job loss. Aim to save 3-6 months of essential expenses. Start small with a goal of ₹5,000-₹10,000, then build from there. Keep this money in a separate savings account that's easily accessible but not connected to your checking account."
        }
        General => {
            "To improve your financial situation, focus on creating a budget, reducing expenses, paying down debt, and building an emergency fund. Start small and be consistent with your financial habits. Every small step counts toward building a more secure financial future."
        }
    }
}

pub fn fallback_chat_reply(msg: &str) -> &'static str {
    canned_reply(detect_topic(msg))
}

pub fn fallback_analysis() -> PsychometricResult {
    PsychometricResult {
        score: 7.0,
        strengths: vec![
            "Problem-solving abilities".to_string(),
            "Adaptability to changing situations".to_string(),
            "Willingness to learn new skills".to_string(),
        ],
        areas_for_development: vec![
            "Strategic planning".to_string(),
            "Financial management".to_string(),
            "Delegation of responsibilities".to_string(),
        ],
        advice: "Focus on developing a structured approach to business planning. Consider taking courses on financial literacy and management.".to_string(),
        resources: vec![
            "Small Business Administration (SBA) courses".to_string(),
            "Local entrepreneurship workshops".to_string(),
            "Online financial planning tools".to_string(),
        ],
    }
}
