use crate::llm::{RecommendationInput, SentimentInput};

/// Price action fed to the recommendation prompt. The synthetic chart is not summarised for the
/// model; every analysis gets the same snapshot.
pub const TECHNICAL_SNAPSHOT: &str = "Assume the stock has been in a consolidation phase recently after a moderate uptrend, with RSI around 55. The price is currently trading slightly above its 50-day moving average.";

pub fn sentiment_prompt(input: &SentimentInput) -> String {
    format!(
        "Act as a senior financial news analyst for the Indonesian stock market.\n\
Your task is to provide a sentiment analysis for {name} ({ticker}).\n\n\
1. Generate a brief, plausible, and hypothetical summary of recent news about the company. \
The news should be relevant to its financial performance or market position.\n\
2. Based on this summary, determine the overall sentiment.\n\
3. Provide a short justification for your sentiment analysis.\n\n\
The output must be a JSON object.",
        name = input.company_name,
        ticker = input.ticker,
    )
}

pub fn recommendation_prompt(input: &RecommendationInput) -> String {
    let f = &input.fundamentals;
    format!(
        "You are an expert AI investment advisor specializing in the Indonesian stock market (IDX).\n\
Your task is to generate a comprehensive investment recommendation for {name} ({ticker}) based on the data provided.\n\n\
Input Data:\n\
- Company: {name} ({ticker})\n\
- Fundamental Metrics:\n\
  - EPS: {eps}\n\
  - PER: {per}\n\
  - PBV: {pbv}\n\
  - ROE: {roe}%\n\
  - DER: {der}\n\
  - Dividend Yield: {dy}%\n\
- News Sentiment: {sentiment}\n\
  - Justification: {justification}\n\
- Technical Snapshot: {technical}\n\n\
Provide a detailed analysis and a final investment recommendation. \
The output must be a JSON object with the requested structure.",
        name = input.company_name,
        ticker = input.ticker,
        eps = f.eps,
        per = f.per,
        pbv = f.pbv,
        roe = f.roe,
        der = f.der,
        dy = f.dividend_yield,
        sentiment = input.sentiment.sentiment,
        justification = input.sentiment.justification,
        technical = TECHNICAL_SNAPSHOT,
    )
}
