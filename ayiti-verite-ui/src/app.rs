//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use ayiti_verite::Access;

use crate::components::{AuthModal, Nav, Protected, Toast};
use crate::pages::{AdminDashboard, FactCheckDetail, Home, UserDashboardPage};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state and restore any stored session
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-white text-gray-900 flex flex-col">
                <Nav />

                <main class="flex-1">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/fact-check/:id" view=FactCheckDetail />
                        <Route
                            path="/dashboard"
                            view=|| view! {
                                <Protected access=Access::Authenticated>
                                    <UserDashboardPage />
                                </Protected>
                            }
                        />
                        <Route
                            path="/admin"
                            view=|| view! {
                                <Protected access=Access::Staff>
                                    <AdminDashboard />
                                </Protected>
                            }
                        />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <AuthModal />
                <Toast />
            </div>
        </Router>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-blue-900 text-blue-100 py-8 px-4">
            <div class="container mx-auto flex flex-col md:flex-row items-center justify-between gap-4 text-sm">
                <div>
                    <p class="font-semibold text-white">"🇭🇹 Ayiti Vérité"</p>
                    <p>"Verifying information and celebrating Haiti."</p>
                </div>
                <div class="flex space-x-6">
                    <a href="/#fact-checks" class="hover:text-white">"Fact-Checks"</a>
                    <a href="/#haiti-unveiled" class="hover:text-white">"Haiti Unveiled"</a>
                    <a href="/#submit" class="hover:text-white">"Submit a Claim"</a>
                </div>
                <p class="text-blue-300">{format!("© {} Ayiti Vérité", chrono::Utc::now().format("%Y"))}</p>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center px-4">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-700 hover:bg-blue-800 text-white rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}
