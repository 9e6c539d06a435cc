use crate::i18n::{fmt_tdb, t, tr};
use pw_market::PriceQuote;
use pw_market::numbers::fmt_amount;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub quote: PriceQuote,
}

/// Original price, offer price, savings and unit price for one parcel.
#[function_component(PriceQuoteView)]
pub fn price_quote(props: &Props) -> Html {
    let quote = &props.quote;
    let pct = quote.ratio.percent_off().to_string();
    let mut args = BTreeMap::new();
    args.insert("pct", pct.as_str());
    let unit = quote
        .unit_price
        .map_or_else(|| t("quote.unit_unavailable"), fmt_amount);

    html! {
        <dl class="price-quote" data-testid="price-quote">
            <dt>{ t("quote.original") }</dt>
            <dd class={classes!("price-quote__original", quote.is_discounted().then_some("is-struck"))}>
                { fmt_tdb(quote.base_price) }
            </dd>
            <dt>{ t("quote.discounted") }</dt>
            <dd class="price-quote__discounted">
                { fmt_tdb(quote.discounted_price) }
                if quote.is_discounted() {
                    <span class="badge">{ tr("quote.percent_off", Some(&args)) }</span>
                }
            </dd>
            <dt>{ t("quote.saved") }</dt>
            <dd class="price-quote__saved">{ fmt_tdb(quote.saved_amount) }</dd>
            <dt>{ t("quote.unit_price") }</dt>
            <dd class="price-quote__unit">{ unit }</dd>
        </dl>
    }
}
