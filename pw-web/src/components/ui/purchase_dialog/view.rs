use super::Props;
use super::state::{FlowAction, FlowModel};
use crate::components::modal::Modal;
use crate::components::ui::debug_trace::DebugTrace;
use crate::components::ui::price_quote::PriceQuoteView;
use crate::i18n::{t, tr};
use pw_market::{ConfirmationGate, FailureReason, PurchaseState};
use std::collections::BTreeMap;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub const PASSWORD_INPUT_ID: &str = "purchase-password";

fn failure_text(reason: &FailureReason) -> String {
    if reason.is_business() {
        reason.message().to_string()
    } else {
        t("purchase.error_generic")
    }
}

pub fn render(
    props: &Props,
    model: &UseReducerHandle<FlowModel>,
    draft: &UseStateHandle<String>,
) -> Html {
    let gate = ConfirmationGate::from_flow(&model.flow, props.config.ratio(), draft.as_str());

    let on_close = {
        let model = model.clone();
        let cb = props.on_close.clone();
        let cancel_enabled = gate.cancel_enabled;
        Callback::from(move |()| {
            if cancel_enabled {
                model.dispatch(FlowAction::Cancel);
                cb.emit(());
            }
        })
    };
    let on_cancel = {
        let on_close = on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_confirm = {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| model.dispatch(FlowAction::Confirm))
    };
    let on_retry = {
        let model = model.clone();
        Callback::from(move |_: MouseEvent| model.dispatch(FlowAction::Retry))
    };
    let on_password = {
        let model = model.clone();
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            model.dispatch(FlowAction::EnterCredential(value.clone()));
            draft.set(value);
        })
    };

    let heading = gate.land_code.as_ref().map(|code| {
        let mut args = BTreeMap::new();
        args.insert("code", code.as_str());
        html! { <h3 class="purchase-dialog__land">{ tr("land.heading", Some(&args)) }</h3> }
    });
    let failure = model
        .flow
        .error()
        .map(failure_text)
        .map(|text| html! { <p class="alert alert-error" role="alert">{ text }</p> });
    let notice = model
        .notice
        .map(|key| html! { <p class="purchase-dialog__notice" role="alert">{ t(key) }</p> });
    let status = match gate.state {
        PurchaseState::Submitting => Some(t("purchase.submitting")),
        PurchaseState::Succeeded => Some(t("purchase.success")),
        _ => None,
    };

    html! {
        <Modal
            open={gate.is_open()}
            title={AttrValue::from(t("purchase.title"))}
            description={Some(AttrValue::from(t("purchase.description")))}
            on_close={on_close}
            dismissible={gate.cancel_enabled}
            return_focus_id={props.return_focus_id.clone()}
        >
            <div class="purchase-dialog" aria-busy={(gate.state == PurchaseState::Submitting).to_string()}>
                { heading.unwrap_or_default() }
                { gate.quote.map(|quote| html! { <PriceQuoteView {quote} /> }).unwrap_or_default() }
                if gate.show_credential {
                    <>
                    <label for={PASSWORD_INPUT_ID}>{ t("purchase.password_label") }</label>
                    <input
                        id={PASSWORD_INPUT_ID}
                        type="password"
                        autocomplete="off"
                        placeholder={t("purchase.password_placeholder")}
                        value={(**draft).clone()}
                        oninput={on_password}
                    />
                    </>
                }
                { notice.unwrap_or_default() }
                { failure.unwrap_or_default() }
                { status.map(|text| html! { <p class="purchase-dialog__status" aria-live="polite">{ text }</p> }).unwrap_or_default() }
                <div class="purchase-dialog__actions">
                    <button
                        type="button"
                        class="btn"
                        disabled={!gate.cancel_enabled}
                        onclick={on_cancel}
                    >
                        { t("purchase.cancel") }
                    </button>
                    if gate.can_retry {
                        <button type="button" class="btn btn-secondary" onclick={on_retry}>
                            { t("purchase.retry") }
                        </button>
                    } else {
                        <button
                            type="button"
                            class="btn btn-primary"
                            disabled={!gate.confirm_enabled}
                            onclick={on_confirm}
                        >
                            { t("purchase.confirm") }
                        </button>
                    }
                </div>
                if props.config.debug {
                    <DebugTrace
                        state={gate.state}
                        submissions={model.flow.submissions()}
                        land_id={model.flow.land_id()}
                    />
                }
            </div>
        </Modal>
    }
}
