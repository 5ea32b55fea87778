//! Static ticker -> CIK table for the companies the tool supports.

const TICKER_TO_CIK: &[(&str, &str)] = &[
    ("AAPL", "0000320193"),  // Apple
    ("MSFT", "0000789019"),  // Microsoft
    ("TSLA", "0001318605"),  // Tesla
    ("AMZN", "0001018724"),  // Amazon
    ("GOOGL", "0001652044"), // Alphabet
    ("META", "0001326801"),  // Meta
    ("NVDA", "0001045810"),  // Nvidia
    ("JPM", "0000019617"),   // JPMorgan
    ("V", "0001403161"),     // Visa
    ("WMT", "0000104169"),   // Walmart
    ("JNJ", "0000200406"),   // Johnson & Johnson
    ("PG", "0000080424"),    // Procter & Gamble
    ("DIS", "0001001039"),   // Disney
    ("NFLX", "0001065280"),  // Netflix
    ("INTC", "0000050863"),  // Intel
    ("AMD", "0000002488"),   // AMD
    ("BA", "0000012927"),    // Boeing
    ("GE", "0000040545"),    // General Electric
    ("F", "0000037996"),     // Ford
    ("GM", "0001467858"),    // General Motors
];

/// Look up the CIK for a ticker symbol (case-insensitive)
pub fn resolve_cik(ticker: &str) -> Option<&'static str> {
    let ticker = ticker.trim().to_uppercase();
    TICKER_TO_CIK
        .iter()
        .find(|(symbol, _)| *symbol == ticker)
        .map(|(_, cik)| *cik)
}

/// Supported tickers, alphabetically
pub fn available_tickers() -> Vec<&'static str> {
    let mut tickers: Vec<&'static str> = TICKER_TO_CIK.iter().map(|(symbol, _)| *symbol).collect();
    tickers.sort_unstable();
    tickers
}
