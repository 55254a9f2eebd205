//! Hero Carousel
//!
//! Rotating slides at the top of the home page. Hovering pauses rotation.

use gloo_timers::callback::Interval;
use leptos::*;

use ayiti_verite::public::{CAROUSEL_INTERVAL, SLIDES};
use ayiti_verite::Carousel;

fn scroll_to(target: &str) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(target))
    {
        el.scroll_into_view();
    }
}

#[component]
pub fn HeroCarousel() -> impl IntoView {
    let carousel = create_rw_signal(Carousel::new());

    let interval = Interval::new(CAROUSEL_INTERVAL.as_millis() as u32, move || {
        carousel.update(|c| c.tick());
    });
    let interval = store_value(Some(interval));
    on_cleanup(move || {
        interval.update_value(|i| {
            if let Some(i) = i.take() {
                i.cancel();
            }
        });
    });

    let slide = move || carousel.with(|c| *c.slide());

    view! {
        <section
            class="relative h-[28rem] overflow-hidden text-white"
            on:mouseenter=move |_| carousel.update(|c| c.set_paused(true))
            on:mouseleave=move |_| carousel.update(|c| c.set_paused(false))
        >
            <div
                class="absolute inset-0 bg-cover bg-center transition-all duration-700"
                style=move || format!("background-image: url('{}')", slide().image)
            />
            <div class="absolute inset-0 bg-black/50" />

            <div class="relative z-10 h-full container mx-auto px-4 flex flex-col justify-center max-w-3xl">
                <h1 class="text-4xl md:text-5xl font-bold mb-4">{move || slide().title}</h1>
                <p class="text-lg mb-6">{move || slide().description}</p>
                <div>
                    <button
                        class="px-6 py-3 bg-blue-700 hover:bg-blue-800 rounded-lg font-medium transition-colors"
                        on:click=move |_| scroll_to(slide().target)
                    >
                        {move || slide().cta}
                    </button>
                </div>
            </div>

            <button
                class="absolute left-4 top-1/2 -translate-y-1/2 z-10 text-3xl px-3 py-1 bg-black/30 rounded-full"
                on:click=move |_| carousel.update(|c| c.previous())
            >
                "‹"
            </button>
            <button
                class="absolute right-4 top-1/2 -translate-y-1/2 z-10 text-3xl px-3 py-1 bg-black/30 rounded-full"
                on:click=move |_| carousel.update(|c| c.next())
            >
                "›"
            </button>

            <div class="absolute bottom-4 left-0 right-0 z-10 flex justify-center space-x-2">
                {(0..SLIDES.len()).map(|index| view! {
                    <button
                        class=move || if carousel.with(|c| c.current() == index) {
                            "w-3 h-3 rounded-full bg-white"
                        } else {
                            "w-3 h-3 rounded-full bg-white/50"
                        }
                        on:click=move |_| carousel.update(|c| c.go_to(index))
                    />
                }).collect_view()}
            </div>
        </section>
    }
}
