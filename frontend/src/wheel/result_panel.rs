use shared::ResultPanel;
use yew::prelude::*;

/// Result panel backed by component state; `Some(label)` means open.
#[derive(Clone)]
pub struct PanelHandle {
    result: UseStateHandle<Option<String>>,
}

impl PanelHandle {
    pub fn new(result: UseStateHandle<Option<String>>) -> Self {
        Self { result }
    }
}

impl ResultPanel for PanelHandle {
    fn show(&mut self, label: &str) {
        self.result.set(Some(label.to_string()));
    }

    fn hide(&mut self) {
        self.result.set(None);
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultTabProps {
    pub prize: Option<String>,
    pub on_spin_again: Callback<MouseEvent>,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(ResultTab)]
pub fn result_tab(props: &ResultTabProps) -> Html {
    let open = props.prize.is_some();

    html! {
        <div
            id="resultTab"
            class={classes!("result-tab", open.then_some("open"))}
            aria-hidden={(!open).to_string()}
        >
            <p class="text-sm uppercase tracking-wide text-gray-500">{"You won"}</p>
            <p id="prizeName" class="text-2xl font-bold text-gray-900">
                { props.prize.clone().unwrap_or_default() }
            </p>
            <div class="mt-4 flex gap-3 justify-center">
                <button id="spinAgainBtn" class={crate::styles::BUTTON_PRIMARY} onclick={props.on_spin_again.clone()}>
                    {"Spin again"}
                </button>
                <button id="closeResultBtn" class={crate::styles::BUTTON_SECONDARY} onclick={props.on_close.clone()}>
                    {"Close"}
                </button>
            </div>
        </div>
    }
}
