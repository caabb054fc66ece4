use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::chat_widget::ChatWidget;

#[cfg(feature = "ssr")]
pub use crate::state::AppState;

/// HTML document rendered on the server around [`App`].
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ru">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/edavis.css"/>
        <Title text="E-Davis - Портал государственных услуг"/>

        <Router>
            <nav class="top-nav">
                <a class="logo" href="/">"E-Davis"</a>
            </nav>
            <main>
                <Routes fallback=|| view! { "Страница не найдена." }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                </Routes>
            </main>
            <ChatWidget/>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <h1>"Портал государственных услуг E-Davis"</h1>
        <p>"Услуги, новости и вакансии в одном месте. Задайте вопрос виртуальному помощнику."</p>
    }
}
