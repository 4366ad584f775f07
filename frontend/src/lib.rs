pub mod config;
pub mod styles;
pub mod wheel;

use yew::prelude::*;

use crate::wheel::PrizeWheel;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| config::load_wheel_config());

    html! {
        <div class={styles::CONTAINER}>
            <h1 class={styles::TEXT_H1}>{"Prize Wheel"}</h1>
            <PrizeWheel config={(*config).clone()} />
        </div>
    }
}
