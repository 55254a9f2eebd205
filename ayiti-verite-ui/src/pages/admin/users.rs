//! Users tab
//!
//! Filters are applied by the server, so changing one triggers a refetch.

use leptos::*;
use std::sync::Arc;

use ayiti_verite::admin::UserFilter;
use ayiti_verite::models::{AdminUser, UserDraft, UserUpdate};
use ayiti_verite::UsersManager;

use super::{DANGER_LINK, INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::components::ListSkeleton;
use crate::state::use_global_state;

fn tri_state(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum RowAction {
    ToggleActive,
    ToggleStaff,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
enum UserForm {
    Create(UserDraft),
    Edit(i64, UserUpdate),
}

#[component]
pub fn UsersTab() -> impl IntoView {
    let state = use_global_state();
    let manager = store_value(Arc::new(UsersManager::new(state.admin_context())));

    let items = create_rw_signal(Vec::<AdminUser>::new());
    let loading = create_rw_signal(true);
    let filter = create_rw_signal(UserFilter::default());
    let form = create_rw_signal(None::<UserForm>);
    let saving = create_rw_signal(false);

    let mirror = move || {
        manager.with_value(|m| {
            items.set(m.users());
            loading.set(m.is_loading());
        });
        state.sync();
    };

    let refetch = move || {
        manager.with_value(|m| m.set_filter(filter.get_untracked()));
        loading.set(true);
        spawn_local(async move {
            manager.get_value().refresh().await;
            mirror();
        });
    };
    refetch();

    let counts = move || {
        items.track();
        manager.with_value(|m| m.counts())
    };

    let open_edit = move |id: i64| {
        if let Some(user) = manager.with_value(|m| m.get(id)) {
            form.set(Some(UserForm::Edit(id, user.to_update())));
        }
    };

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = form.get_untracked() else {
            return;
        };
        saving.set(true);
        spawn_local(async move {
            let m = manager.get_value();
            let ok = match &current {
                UserForm::Create(draft) => m.create(draft).await,
                UserForm::Edit(id, update) => m.update(*id, update).await,
            };
            saving.set(false);
            if ok {
                form.set(None);
            }
            mirror();
        });
    };

    let act = move |id: i64, action: RowAction| {
        spawn_local(async move {
            let m = manager.get_value();
            match action {
                RowAction::ToggleActive => m.toggle_active(id).await,
                RowAction::ToggleStaff => m.toggle_staff(id).await,
                RowAction::Delete => m.delete(id).await,
            };
            mirror();
        });
    };

    // Text field bound to either form variant
    let text_field = move |label: &'static str, kind: &'static str, get: fn(&UserForm) -> String, set: fn(&mut UserForm, String)| {
        view! {
            <input
                type=kind
                placeholder=label
                class=INPUT_CLASS
                prop:value=move || form.with(|f| f.as_ref().map(get).unwrap_or_default())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| {
                        if let Some(f) = f {
                            set(f, value);
                        }
                    });
                }
            />
        }
    };

    view! {
        <div class="space-y-6">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {move || {
                    let c = counts();
                    [("Total", c.total), ("Staff", c.staff), ("Active", c.active), ("Inactive", c.inactive)]
                        .into_iter()
                        .map(|(label, value)| view! {
                            <div class="bg-white rounded-lg shadow p-4">
                                <p class="text-sm text-gray-500">{label}</p>
                                <p class="text-2xl font-bold">{value}</p>
                            </div>
                        })
                        .collect_view()
                }}
            </div>

            <div class="flex flex-wrap items-center gap-3">
                <input
                    type="search"
                    placeholder="Search users..."
                    class=format!("{} md:w-72", INPUT_CLASS)
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
                    on:change=move |_| refetch()
                />
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| {
                        filter.update(|f| f.is_staff = tri_state(&event_target_value(&ev)));
                        refetch();
                    }
                >
                    <option value="all">"All roles"</option>
                    <option value="true">"Staff"</option>
                    <option value="false">"Users"</option>
                </select>
                <select
                    class="border border-gray-300 rounded-lg px-3 py-2 text-sm"
                    on:change=move |ev| {
                        filter.update(|f| f.is_active = tri_state(&event_target_value(&ev)));
                        refetch();
                    }
                >
                    <option value="all">"All statuses"</option>
                    <option value="true">"Active"</option>
                    <option value="false">"Inactive"</option>
                </select>
                <button
                    class=format!("{} ml-auto", PRIMARY_BUTTON)
                    on:click=move |_| form.set(Some(UserForm::Create(UserDraft::default())))
                >
                    "New User"
                </button>
            </div>

            <Show when=move || form.with(|f| f.is_some())>
                <form class="bg-white rounded-lg shadow p-5 space-y-3" on:submit=save>
                    <h3 class="font-semibold">
                        {move || if form.with(|f| matches!(f, Some(UserForm::Edit(..)))) { "Edit User" } else { "New User" }}
                    </h3>
                    <div class="grid md:grid-cols-2 gap-3">
                        {text_field("Username", "text",
                            |f| match f { UserForm::Create(d) => d.username.clone(), UserForm::Edit(_, u) => u.username.clone() },
                            |f, v| match f { UserForm::Create(d) => d.username = v, UserForm::Edit(_, u) => u.username = v })}
                        {text_field("Email", "email",
                            |f| match f { UserForm::Create(d) => d.email.clone(), UserForm::Edit(_, u) => u.email.clone() },
                            |f, v| match f { UserForm::Create(d) => d.email = v, UserForm::Edit(_, u) => u.email = v })}
                        {text_field("First name", "text",
                            |f| match f { UserForm::Create(d) => d.first_name.clone(), UserForm::Edit(_, u) => u.first_name.clone() },
                            |f, v| match f { UserForm::Create(d) => d.first_name = v, UserForm::Edit(_, u) => u.first_name = v })}
                        {text_field("Last name", "text",
                            |f| match f { UserForm::Create(d) => d.last_name.clone(), UserForm::Edit(_, u) => u.last_name.clone() },
                            |f, v| match f { UserForm::Create(d) => d.last_name = v, UserForm::Edit(_, u) => u.last_name = v })}
                        <Show when=move || form.with(|f| matches!(f, Some(UserForm::Create(_))))>
                            {text_field("Password", "password",
                                |f| match f { UserForm::Create(d) => d.password.clone(), UserForm::Edit(..) => String::new() },
                                |f, v| if let UserForm::Create(d) = f { d.password = v })}
                        </Show>
                    </div>
                    <div class="flex gap-6 text-sm">
                        <label class="flex items-center gap-2">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| match f {
                                    Some(UserForm::Create(d)) => d.is_staff,
                                    Some(UserForm::Edit(_, u)) => u.is_staff,
                                    None => false,
                                })
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    form.update(|f| match f {
                                        Some(UserForm::Create(d)) => d.is_staff = checked,
                                        Some(UserForm::Edit(_, u)) => u.is_staff = checked,
                                        None => {}
                                    });
                                }
                            />
                            "Staff"
                        </label>
                        <label class="flex items-center gap-2">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| match f {
                                    Some(UserForm::Create(d)) => d.is_active,
                                    Some(UserForm::Edit(_, u)) => u.is_active,
                                    None => false,
                                })
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    form.update(|f| match f {
                                        Some(UserForm::Create(d)) => d.is_active = checked,
                                        Some(UserForm::Edit(_, u)) => u.is_active = checked,
                                        None => {}
                                    });
                                }
                            />
                            "Active"
                        </label>
                    </div>
                    <div class="flex gap-2">
                        <button type="submit" class=PRIMARY_BUTTON disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                        <button type="button" class=SECONDARY_BUTTON on:click=move |_| form.set(None)>"Cancel"</button>
                    </div>
                </form>
            </Show>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }
                let rows = items.get();
                if rows.is_empty() {
                    return view! { <p class="text-gray-500">"No users found."</p> }.into_view();
                }
                view! {
                    <div class="bg-white rounded-lg shadow divide-y">
                        {rows.into_iter().map(|user| {
                            let id = user.id;
                            let me = user.is_current_user;
                            let badge = if user.is_active {
                                "text-xs px-2 py-0.5 rounded-full bg-green-100 text-green-800"
                            } else {
                                "text-xs px-2 py-0.5 rounded-full bg-red-100 text-red-800"
                            };
                            view! {
                                <div class="px-4 py-3 flex flex-wrap items-center gap-4">
                                    <div class="flex-1 min-w-0">
                                        <p class="font-medium">
                                            {user.display_name().to_string()}
                                            {me.then(|| view! { <span class="ml-2 text-xs text-blue-700">"(you)"</span> })}
                                        </p>
                                        <p class="text-xs text-gray-500">{format!("@{} · {}", user.username, user.email)}</p>
                                        <p class="text-xs text-gray-400">
                                            {format!("Joined {}", user.date_joined.format("%b %-d, %Y"))}
                                            {user.last_login.map(|l| format!(" · Last login {}", l.format("%b %-d, %Y")))}
                                        </p>
                                    </div>
                                    <span class="text-xs px-2 py-0.5 rounded-full bg-gray-100">{user.role_label()}</span>
                                    <span class=badge>
                                        {if user.is_active { "Active" } else { "Inactive" }}
                                    </span>
                                    <div class="flex gap-3">
                                        <button class="text-sm text-blue-700 hover:underline" on:click=move |_| open_edit(id)>"Edit"</button>
                                        <button class="text-sm text-gray-700 hover:underline" on:click=move |_| act(id, RowAction::ToggleActive)>
                                            {if user.is_active { "Deactivate" } else { "Activate" }}
                                        </button>
                                        <button class="text-sm text-gray-700 hover:underline" on:click=move |_| act(id, RowAction::ToggleStaff)>
                                            {if user.is_staff { "Revoke staff" } else { "Make staff" }}
                                        </button>
                                        <button class=DANGER_LINK on:click=move |_| act(id, RowAction::Delete)>"Delete"</button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_view()
            }}
        </div>
    }
}
