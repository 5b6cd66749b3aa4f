use crate::models::ExtractRequest;

// Tactical-analysis prompt sent to the completion provider. The template is
// fixed per deployment; only the five request fields vary.
pub fn render(req: &ExtractRequest) -> String {
    format!(
        "Shadow Protocol AI: Revenue Extraction.\n\
         Data: @{handle}, {country}, {currency}({symbol}), {symbol}{price}, 20% floor.\n\
         Task: Tactical analysis. ALL CAPS. Direct. No fluff.\n\
         Format:\n\
         > [Market]\n\
         > [Gap]\n\
         > [Architecture]\n\
         > EXTRACTION: 1k buyers @ 20% floor — PROJECTED REVENUE: {symbol}[1000*0.20*{price}]\n\
         > [Final]\n\
         Output ONLY \">\" lines. Max 90ch.",
        handle = req.handle,
        country = req.country,
        currency = req.currency,
        symbol = req.symbol,
        price = req.price,
    )
}
