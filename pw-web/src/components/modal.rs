//! Dialog shell shared by the purchase flow.
//!
//! Focus moves into the dialog when it opens and back to `return_focus_id`
//! when it closes. A non-dismissible dialog ignores Escape, backdrop clicks
//! and the close button, which keeps an in-flight purchase on screen.
use crate::a11y::restore_focus;
use crate::i18n::t;
use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static NEXT_DIALOG: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    #[prop_or_default]
    pub return_focus_id: Option<AttrValue>,
    #[prop_or(true)]
    pub dismissible: bool,
    #[prop_or_default]
    pub children: Children,
}

struct DialogIds {
    container: String,
    title: String,
    description: Option<String>,
}

impl DialogIds {
    fn new(seq: usize, has_description: bool) -> Self {
        Self {
            container: format!("modal-{seq}"),
            title: format!("modal-title-{seq}"),
            description: has_description.then(|| format!("modal-desc-{seq}")),
        }
    }
}

/// Focus the dialog on open; hand focus back on the open → closed edge only.
#[hook]
fn use_dialog_focus(open: bool, return_focus_id: Option<AttrValue>) -> NodeRef {
    let node = use_node_ref();
    let was_open = use_mut_ref(|| false);
    {
        let node = node.clone();
        use_effect_with((open, return_focus_id), move |(open, return_focus_id)| {
            let closing = *was_open.borrow() && !*open;
            *was_open.borrow_mut() = *open;
            if *open {
                if let Some(el) = node.cast::<web_sys::HtmlElement>() {
                    let _ = el.set_attribute("tabindex", "-1");
                    let _ = el.focus();
                }
            } else if closing && let Some(id) = return_focus_id {
                restore_focus(id);
            }
            || {}
        });
    }
    node
}

fn dismiss_on_click(on_close: &Callback<()>, dismissible: bool) -> Callback<MouseEvent> {
    let on_close = on_close.clone();
    Callback::from(move |_| {
        if dismissible {
            on_close.emit(());
        }
    })
}

fn dismiss_on_escape(on_close: &Callback<()>, dismissible: bool) -> Callback<KeyboardEvent> {
    let on_close = on_close.clone();
    Callback::from(move |e: KeyboardEvent| {
        if dismissible && e.key() == "Escape" {
            e.prevent_default();
            on_close.emit(());
        }
    })
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let seq = use_state(|| NEXT_DIALOG.fetch_add(1, Ordering::Relaxed));
    let node = use_dialog_focus(props.open, props.return_focus_id.clone());

    if !props.open {
        return Html::default();
    }

    let ids = DialogIds::new(*seq, props.description.is_some());
    let backdrop_click = dismiss_on_click(&props.on_close, props.dismissible);
    let close_click = dismiss_on_click(&props.on_close, props.dismissible);
    let keydown = dismiss_on_escape(&props.on_close, props.dismissible);
    // Keep clicks inside the panel away from the backdrop.
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());

    let description = match (&props.description, &ids.description) {
        (Some(text), Some(id)) => html! {
            <p id={id.clone()} class="modal__description">{ text.clone() }</p>
        },
        _ => Html::default(),
    };

    html! {
        <div class="modal-backdrop" role="presentation" onclick={backdrop_click}>
            <div
                id={ids.container}
                ref={node}
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={ids.title.clone()}
                aria-describedby={ids.description.clone().unwrap_or_default()}
                onclick={swallow}
                onkeydown={keydown}
            >
                <div class="modal__header">
                    <h2 id={ids.title}>{ props.title.clone() }</h2>
                    <button
                        type="button"
                        class="modal__close"
                        aria-label={t("dialog.close")}
                        disabled={!props.dismissible}
                        onclick={close_click}
                    >
                        {"×"}
                    </button>
                </div>
                { description }
                <div class="modal__body">{ for props.children.iter() }</div>
            </div>
        </div>
    }
}
