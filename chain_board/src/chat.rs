//! Natural-language Q&A over the filtered sales table.
//!
//! The external model sees a CSV excerpt of the filtered data plus the
//! user's question; nothing else leaves the session. The local
//! [`insights`] summary needs no external call at all.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use tracing::error;

use sales_data::SalesRecord;

use crate::config::ChatConfig;
use crate::session::SessionState;

const SYSTEM_PROMPT: &str = "You are an analyst for a restaurant chain. Answer questions \
about the provided sales data, giving analysis and forecasts grounded in it. When the data \
cannot answer the question, say so.";

/// What slice of the table the question is about. A restaurant is
/// required; year and product narrow further.
#[derive(Debug, Clone, Copy)]
pub struct ChatFilter<'a> {
    pub restaurant: &'a str,
    pub year: Option<i32>,
    pub product: Option<&'a str>,
}

/// Deterministic summary of the filtered slice.
#[derive(Debug, Clone, PartialEq)]
pub struct DataInsights {
    pub top_product: String,
    pub restaurant_total: f64,
    pub mean_weekly_orders: f64,
}

/// Select the records the question is scoped to.
pub fn filtered_records<'a>(
    session: &'a SessionState,
    filter: &ChatFilter<'_>,
) -> anyhow::Result<Vec<&'a SalesRecord>> {
    if !session
        .cleaned()
        .restaurants()
        .iter()
        .any(|r| r == filter.restaurant)
    {
        anyhow::bail!(
            "'{}' is not a restaurant column in this data",
            filter.restaurant
        );
    }

    let records: Vec<&SalesRecord> = session
        .cleaned()
        .records
        .iter()
        .filter(|r| session.config().is_analysis_product(&r.product))
        .filter(|r| filter.year.map_or(true, |year| r.year == year))
        .filter(|r| filter.product.map_or(true, |product| r.product == product))
        .collect();

    if records.is_empty() {
        anyhow::bail!("no rows match the chosen filters");
    }
    Ok(records)
}

/// Serialize the filtered slice as CSV: the base columns plus the one
/// restaurant the question is about.
pub fn csv_excerpt(records: &[&SalesRecord], restaurant: &str) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Year", "Week", "Month", "Product", "Total", restaurant])?;

    for record in records {
        let restaurant_value = record
            .by_restaurant
            .get(restaurant)
            .map(|v| v.to_string())
            .unwrap_or_default();
        writer.write_record([
            record.year.to_string(),
            record.week.to_string(),
            record.month.to_string(),
            record.product.clone(),
            record.total.to_string(),
            restaurant_value,
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Local summary of the filtered slice: most-sold product, total and
/// mean weekly orders at the restaurant. None when the restaurant has
/// no reported sales in the slice.
pub fn insights(records: &[&SalesRecord], restaurant: &str) -> Option<DataInsights> {
    let mut per_product: Vec<(&str, f64)> = Vec::new();
    let mut total = 0.0;
    let mut weeks = 0usize;

    for record in records {
        let Some(value) = record.by_restaurant.get(restaurant) else {
            continue;
        };
        total += value;
        weeks += 1;
        match per_product.iter_mut().find(|(p, _)| *p == record.product) {
            Some((_, sum)) => *sum += value,
            None => per_product.push((record.product.as_str(), *value)),
        }
    }

    let top_product = per_product
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))?
        .0
        .to_string();

    Some(DataInsights {
        top_product,
        restaurant_total: total,
        mean_weekly_orders: total / weeks as f64,
    })
}

/// Ask the external model a question about the filtered slice.
pub async fn ask(
    chat: &ChatConfig,
    session: &SessionState,
    filter: &ChatFilter<'_>,
    question: &str,
) -> anyhow::Result<String> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("the question is empty");
    }

    let api_key = std::env::var(&chat.api_key_env)
        .map_err(|_| anyhow::anyhow!("{} is not set", chat.api_key_env))?;

    let records = filtered_records(session, filter)?;
    let excerpt = csv_excerpt(&records, filter.restaurant)?;

    let request = CreateChatCompletionRequestArgs::default()
        .model(chat.model.as_str())
        .temperature(chat.temperature)
        .max_tokens(chat.max_tokens)
        .messages([
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "Here is the restaurant data:\n{excerpt}\nQuestion: {question}"
                ))
                .build()?
                .into(),
        ])
        .build()?;

    let config = OpenAIConfig::new().with_api_key(api_key);
    let client = Client::with_config(config);
    let response = client.chat().create(request).await.map_err(|e| {
        error!("chat completion failed: {}", e);
        e
    })?;

    let answer = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .ok_or_else(|| anyhow::anyhow!("the model returned no content"))?;
    Ok(answer)
}
