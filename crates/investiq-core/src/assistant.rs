//! Rule-based financial assistant
//!
//! A prompt is matched against an ordered keyword table; the first topic with a
//! matching keyword wins and renders a fixed template filled with figures from
//! the caller's records. There is no model behind this and no state between
//! calls: the same prompt, records and date always give the same text.

use chrono::NaiveDate;

use crate::analytics::financial_summary;
use crate::models::{Budget, FinancialSummary, Transaction};

/// Which canned response a prompt selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Spending,
    Budget,
    Income,
    Balance,
    Goals,
    Overview,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spending => "spending",
            Self::Budget => "budget",
            Self::Income => "income",
            Self::Balance => "balance",
            Self::Goals => "goals",
            Self::Overview => "overview",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keyword groups in priority order. Matching is substring containment on the
/// lower-cased prompt, so "expenses" matches "expense" but "spend" matches nothing.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Spending, &["spending", "expense"]),
    (Topic::Budget, &["budget", "save"]),
    (Topic::Income, &["income", "earn"]),
    (Topic::Balance, &["balance", "total"]),
    (Topic::Goals, &["goal", "plan"]),
];

/// Savings-rate threshold (percent) below which the budget answer nudges the user
const HEALTHY_SAVINGS_RATE: f64 = 20.0;
const SAVINGS_TARGET_SHARE: f64 = 0.2;
const EMERGENCY_FUND_MONTHS: f64 = 3.0;

/// One user's records as handed to the assistant
///
/// `budgets` is part of the input but none of the current templates read it;
/// every response is built from the transactions alone.
#[derive(Debug, Clone, Copy)]
pub struct FinancialSnapshot<'a> {
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
}

impl<'a> FinancialSnapshot<'a> {
    pub fn new(transactions: &'a [Transaction], budgets: &'a [Budget]) -> Self {
        Self {
            transactions,
            budgets,
        }
    }
}

/// Pick the topic for a prompt
pub fn select_topic(prompt: &str) -> Topic {
    let lower = prompt.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Overview)
}

/// Answer a prompt from the snapshot, treating `today`'s month as "this month"
pub fn respond(prompt: &str, snapshot: &FinancialSnapshot<'_>, today: NaiveDate) -> String {
    let summary = financial_summary(snapshot.transactions, today);
    let topic = select_topic(prompt);
    tracing::debug!(topic = %topic, "Assistant topic selected");

    match topic {
        Topic::Spending => spending_response(&summary),
        Topic::Budget => budget_response(&summary),
        Topic::Income => income_response(&summary),
        Topic::Balance => balance_response(&summary),
        Topic::Goals => goals_response(&summary),
        Topic::Overview => overview_response(&summary),
    }
}

/// Savings rate in percent, rendered with one decimal, or "0" with no income
///
/// The returned number is the rendered value, so threshold checks agree with
/// what the user reads.
fn savings_rate(summary: &FinancialSummary) -> (f64, String) {
    if summary.monthly_income > 0.0 {
        let rate = summary.monthly_net_income / summary.monthly_income * 100.0;
        let text = format!("{:.1}", rate);
        (text.parse().unwrap_or(rate), text)
    } else {
        (0.0, "0".to_string())
    }
}

fn spending_response(s: &FinancialSummary) -> String {
    let (top_name, top_amount) = match &s.top_spending_category {
        Some(top) => (top.name.as_str(), format_money(top.amount)),
        None => ("N/A", "0".to_string()),
    };

    let mut text = format!(
        "Based on your recent activity, you've spent ${} this month. \
         Your highest spending category is \"{}\" with ${}.\n\n\
         💡 **Recommendations:**\n\
         • Consider setting a budget limit for your top spending categories\n\
         • Track daily expenses to identify unnecessary purchases\n\
         • Look for subscription services you might not be using",
        format_money(s.monthly_expenses),
        top_name,
        top_amount,
    );
    if s.monthly_expenses > s.monthly_income {
        text.push_str(
            "\n• Your expenses exceed income this month - focus on reducing discretionary spending",
        );
    }
    text
}

fn budget_response(s: &FinancialSummary) -> String {
    let (rate, rate_text) = savings_rate(s);
    let closing = if rate < HEALTHY_SAVINGS_RATE {
        "• Try to increase your savings rate by reducing discretionary spending"
    } else {
        "• Great job on maintaining a healthy savings rate!"
    };

    format!(
        "Your current savings rate is {}% this month (saving ${}).\n\n\
         💡 **Budget Suggestions:**\n\
         • Aim for the 50/30/20 rule: 50% needs, 30% wants, 20% savings\n\
         • Your recommended monthly savings target: ${}\n\
         • Consider automatic transfers to a savings account\n\
         {}",
        rate_text,
        format_money(s.monthly_net_income),
        format_money(s.monthly_income * SAVINGS_TARGET_SHARE),
        closing,
    )
}

fn income_response(s: &FinancialSummary) -> String {
    format!(
        "Your monthly income is ${}.\n\n\
         💡 **Income Optimization Tips:**\n\
         • Consider side hustles or freelance work in your spare time\n\
         • Ask for a raise if you haven't had one recently\n\
         • Explore passive income opportunities like investments\n\
         • Track all income sources including bonuses and gifts",
        format_money(s.monthly_income),
    )
}

fn balance_response(s: &FinancialSummary) -> String {
    let closing = if s.total_balance < 0.0 {
        "⚠️ Consider creating a debt payoff plan and increasing income or reducing expenses."
    } else {
        "✅ You're maintaining a positive balance!"
    };

    format!(
        "Your current balance is ${}.\n\n\
         📊 **Financial Summary:**\n\
         • Monthly Income: ${}\n\
         • Monthly Expenses: ${}\n\
         • Net Cash Flow: ${}\n\n\
         {}",
        format_money(s.total_balance),
        format_money(s.monthly_income),
        format_money(s.monthly_expenses),
        format_money(s.monthly_net_income),
        closing,
    )
}

fn goals_response(s: &FinancialSummary) -> String {
    let debt = if s.total_balance < 0.0 {
        format!("Focus on eliminating ${} debt", format_money(s.total_balance.abs()))
    } else {
        "Great job staying debt-free!".to_string()
    };

    format!(
        "Let me help you set financial goals based on your current situation:\n\n\
         🎯 **Recommended Goals:**\n\
         • Emergency Fund: Aim for ${} (3 months expenses)\n\
         • Monthly Savings: ${} (20% of income)\n\
         • Debt Payoff: {}\n\n\
         📈 **Action Steps:**\n\
         1. Set up automatic savings transfers\n\
         2. Review and optimize your spending categories\n\
         3. Consider increasing income through skill development",
        format_money(s.monthly_expenses * EMERGENCY_FUND_MONTHS),
        format_money(s.monthly_income * SAVINGS_TARGET_SHARE),
        debt,
    )
}

fn overview_response(s: &FinancialSummary) -> String {
    format!(
        "I can help you with various financial topics! Here's a quick overview of your finances:\n\n\
         📊 **This Month:**\n\
         • Income: ${}\n\
         • Expenses: ${}\n\
         • Balance: ${}\n\n\
         💡 **Ask me about:**\n\
         • Budgeting strategies and savings tips\n\
         • Spending analysis and expense reduction\n\
         • Financial goal setting and planning\n\
         • Income optimization ideas\n\n\
         What specific area would you like to focus on?",
        format_money(s.monthly_income),
        format_money(s.monthly_expenses),
        format_money(s.total_balance),
    )
}

/// Format an amount with thousands separators and at most three decimals,
/// dropping trailing zeros: `1234.5` → `1,234.5`, `-0.1234` → `-0.123`
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = whole.chars().all(|c| c == '0') && fraction.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}
