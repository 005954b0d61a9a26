use leptos::prelude::*;

use super::globe::GlobeTile;

const CONTACT_EMAIL: &str = "abhigyadufare@gmail.com";

struct GridItem {
    id: u32,
    title: &'static str,
    description: &'static str,
    class: &'static str,
}

const GRID_ITEMS: [GridItem; 6] = [
    GridItem {
        id: 1,
        title: "I prioritize client collaboration, fostering open communication",
        description: "",
        class: "lg:col-span-3 md:col-span-6 md:row-span-4 lg:min-h-[60vh]",
    },
    GridItem {
        id: 2,
        title: "I'm very flexible with time zone communications",
        description: "",
        class: "lg:col-span-2 md:col-span-3 md:row-span-2",
    },
    GridItem {
        id: 3,
        title: "My tech stack",
        description: "I constantly try to improve",
        class: "lg:col-span-2 md:col-span-3 md:row-span-2",
    },
    GridItem {
        id: 4,
        title: "Tech enthusiast with a passion for development.",
        description: "",
        class: "lg:col-span-2 md:col-span-3 md:row-span-1",
    },
    GridItem {
        id: 5,
        title: "Currently building a JS Animation library",
        description: "The Inside Scoop",
        class: "md:col-span-3 md:row-span-2",
    },
    GridItem {
        id: 6,
        title: "Do you want to start a project together?",
        description: "",
        class: "lg:col-span-2 md:col-span-3 md:row-span-1",
    },
];

const LEFT_SKILLS: [&str; 4] = ["ReactJs", "NextJs", "Tailwindcss", "Liquid"];
const RIGHT_SKILLS: [&str; 4] = ["MongoDB", "Express", "NodeJs", "Redux"];

#[component]
pub fn BentoGrid() -> impl IntoView {
    view! {
        <section id="about">
            <div class="grid grid-cols-1 md:grid-cols-6 lg:grid-cols-5 md:grid-row-7 gap-4 lg:gap-8 mx-auto w-full py-20">
                {GRID_ITEMS
                    .iter()
                    .map(|item| {
                        view! {
                            <BentoGridItem
                                id=item.id
                                title=item.title
                                description=item.description
                                class=item.class
                            />
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn BentoGridItem(
    id: u32,
    title: &'static str,
    description: &'static str,
    class: &'static str,
) -> impl IntoView {
    let (copied, set_copied) = signal(false);

    view! {
        <div class=format!(
            "row-span-1 relative overflow-hidden rounded-3xl border border-white/[0.1] group/bento hover:shadow-xl transition duration-200 justify-between flex flex-col space-y-4 bg-gradient-to-r from-slate-900 to-slate-950 {class}",
        )>
            <div class=if id == 6 { "flex flex-col items-center h-full" } else { "h-full" }>
                <div class="group-hover/bento:translate-x-4 transition duration-500 md:h-full min-h-40 flex flex-col px-5 p-5 lg:p-10">
                    <div class="font-extralight z-10 text-[#c1c2d3] text-sm md:text-xs lg:text-base">
                        {description}
                    </div>
                    <div class="font-bold z-10 text-lg lg:text-3xl max-w-96">{title}</div>
                </div>
                {(id == 2).then(|| view! { <GlobeTile /> })}
                {(id == 3).then(|| view! { <SkillColumns /> })}
                {(id == 6)
                    .then(|| {
                        view! {
                            <div class="-mt-10 mb-10 md:-mt-20 relative">
                                <button
                                    class="inline-flex h-12 items-center justify-center gap-3 rounded-lg bg-[#161a31] px-7 text-sm font-medium border border-slate-700"
                                    onclick=format!("navigator.clipboard.writeText('{CONTACT_EMAIL}')")
                                    on:click=move |_| set_copied.set(true)
                                >
                                    {move || {
                                        if copied.get() { "Email is Copied" } else { "Copy my Email Address" }
                                    }}
                                </button>
                            </div>
                        }
                    })}
            </div>
        </div>
    }
}

#[component]
fn SkillColumns() -> impl IntoView {
    let skill = |name: &'static str| {
        view! {
            <span class="lg:py-4 lg:px-3 py-2 px-3 text-xs lg:text-base opacity-50 lg:opacity-100 rounded-lg text-center bg-[#10132E]">
                {name}
            </span>
        }
    };
    view! {
        <div class="flex gap-2 lg:gap-5 w-fit absolute -top-2 -right-3 lg:-right-2">
            <div class="flex flex-col gap-3 lg:gap-8">
                <span class="py-4 px-3 bg-[#10132E] rounded-lg text-center"></span>
                {LEFT_SKILLS.into_iter().map(skill).collect_view()}
            </div>
            <div class="flex flex-col gap-3 lg:gap-8">
                {RIGHT_SKILLS.into_iter().map(skill).collect_view()}
                <span class="py-4 px-3 bg-[#10132E] rounded-lg text-center"></span>
            </div>
        </div>
    }
}
