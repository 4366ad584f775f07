mod frame_loop;
mod result_panel;
mod wheel_audio;
mod wheel_canvas;

pub use frame_loop::RafScheduler;
pub use result_panel::{PanelHandle, ResultTab};
pub use wheel_audio::WebSynth;
pub use wheel_canvas::CanvasPainter;

use crate::styles;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shared::{AudioEngine, FrameStatus, WheelConfig, WheelController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

pub type WebWheel = WheelController<AudioEngine<WebSynth>, PanelHandle, CanvasPainter, RafScheduler>;

type WheelSlot = Rc<RefCell<Option<Rc<RefCell<WebWheel>>>>>;

const CUSTOM_CSS: &str = r#"
.result-tab {
    opacity: 0;
    pointer-events: none;
    transform: translateY(12px);
    transition: opacity 200ms ease, transform 200ms ease;
}
.result-tab.open {
    opacity: 1;
    pointer-events: auto;
    transform: translateY(0);
}
"#;

/// Builds the controller for a mounted canvas and hooks it to the frame loop.
fn mount(
    canvas: HtmlCanvasElement,
    config: &WheelConfig,
    panel: PanelHandle,
    spinning: UseStateHandle<bool>,
) -> Result<Rc<RefCell<WebWheel>>, JsValue> {
    let painter = CanvasPainter::new(canvas)?;
    let frames = RafScheduler::default();

    let wheel = Rc::new(RefCell::new(WheelController::new(
        config.slice_set(),
        config.tuning,
        AudioEngine::new(WebSynth::default()),
        panel,
        painter,
        frames.clone(),
        SmallRng::from_entropy(),
    )));

    let weak = Rc::downgrade(&wheel);
    frames.install(move || {
        let Some(wheel) = weak.upgrade() else {
            return;
        };
        let status = match wheel.try_borrow_mut() {
            Ok(mut wheel) => wheel.frame(),
            Err(_) => {
                log::warn!("Wheel busy, skipping frame");
                return;
            }
        };
        if let FrameStatus::Finished(_) = status {
            spinning.set(false);
        }
    });

    wheel.borrow_mut().redraw();
    Ok(wheel)
}

fn with_wheel(slot: &WheelSlot, action: impl FnOnce(&mut WebWheel)) {
    if let Some(wheel) = slot.borrow().as_ref() {
        match wheel.try_borrow_mut() {
            Ok(mut wheel) => action(&mut wheel),
            Err(_) => log::warn!("Wheel busy, ignoring input"),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PrizeWheelProps {
    pub config: WheelConfig,
}

#[function_component(PrizeWheel)]
pub fn prize_wheel(props: &PrizeWheelProps) -> Html {
    let canvas_ref = use_node_ref();
    let result = use_state(|| None::<String>);
    let spinning = use_state(|| false);
    let slot: WheelSlot = use_mut_ref(|| None);

    // Apply custom CSS
    {
        use_effect_with((), move |_| {
            let document = gloo_utils::document();
            let style = document.create_element("style").ok();
            if let (Some(style), Some(head)) = (&style, document.head()) {
                style.set_text_content(Some(CUSTOM_CSS));
                let _ = head.append_child(style);
            }

            move || {
                if let Some(style) = style {
                    style.remove();
                }
            }
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let slot = slot.clone();
        let panel = PanelHandle::new(result.clone());
        let spinning = spinning.clone();
        let config = props.config.clone();

        use_effect_with((), move |_| {
            match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => match mount(canvas, &config, panel, spinning) {
                    Ok(wheel) => *slot.borrow_mut() = Some(wheel),
                    Err(e) => log::error!("Failed to mount wheel: {:?}", e),
                },
                None => log::error!("Wheel canvas missing"),
            }

            move || {
                if let Some(wheel) = slot.borrow_mut().take() {
                    let mut wheel = wheel.borrow_mut();
                    wheel.release_audio();
                    wheel.frames().cancel();
                }
            }
        });
    }

    let on_spin = {
        let slot = slot.clone();
        let spinning = spinning.clone();
        Callback::from(move |_: MouseEvent| {
            with_wheel(&slot, |wheel| {
                if wheel.spin() {
                    spinning.set(true);
                }
            });
        })
    };

    let on_spin_again = {
        let slot = slot.clone();
        let spinning = spinning.clone();
        Callback::from(move |_: MouseEvent| {
            with_wheel(&slot, |wheel| {
                if wheel.spin_again() {
                    spinning.set(true);
                }
            });
        })
    };

    let on_close = {
        let slot = slot.clone();
        Callback::from(move |_: MouseEvent| with_wheel(&slot, |wheel| wheel.close()))
    };

    let size = props.config.canvas_size.to_string();

    html! {
        <div class={styles::WHEEL_CARD}>
            <canvas
                id="wheelCanvas"
                ref={canvas_ref}
                width={size.clone()}
                height={size}
                class={styles::WHEEL_CANVAS}
            />
            <button
                id="spinBtn"
                class={styles::BUTTON_SPIN}
                onclick={on_spin}
                aria-busy={(*spinning).to_string()}
            >
                { if *spinning { "Spinning..." } else { "Spin" } }
            </button>
            <ResultTab
                prize={(*result).clone()}
                on_spin_again={on_spin_again}
                on_close={on_close}
            />
        </div>
    }
}
