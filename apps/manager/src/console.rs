//! # Console Front End
//!
//! The interactive driver standing where a windowing front end would
//! attach. Every action maps one-to-one onto the command surface, so a
//! graphical shell can replace this file without touching anything below
//! it.
//!
//! ```text
//! cantina> search latte
//! 2 matching item(s)
//! cantina> next
//! [2/2] Latte — Beverages — $3.50
//! cantina> price 3.75
//! cantina> save
//! ✓ saved Latte
//! cantina> print
//! ✓ report rendered (1 page) — preview open
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use tokio::runtime::Runtime;

use crate::commands::{menu_item, report};
use crate::error::ApiError;
use crate::state::FormState;
use cantina_db::Database;
use cantina_report::{LpPrintQueue, ReportViewer, DEFAULT_SAVE_NAME};

/// Runs the console loop until `quit` or end of input.
pub fn run(
    runtime: &Runtime,
    db: &Database,
    form: &FormState,
    reports_dir: &Path,
) -> Result<(), ApiError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut viewer: Option<ReportViewer> = None;

    println!("Cantina menu manager — type 'help' for commands");
    print_form(form);

    loop {
        print!("cantina> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let result = match command {
            "help" => {
                print_help();
                Ok(())
            }
            "quit" | "exit" => break,

            // --- field editing ---------------------------------------------
            "name" => {
                form.with_session_mut(|s| s.fields_mut().name = rest.to_string());
                Ok(())
            }
            "desc" => {
                form.with_session_mut(|s| s.fields_mut().description = rest.to_string());
                Ok(())
            }
            "price" => {
                form.with_session_mut(|s| s.fields_mut().price_input = rest.to_string());
                Ok(())
            }
            "category" => select_category(form, rest),
            "image" => load_image(form, rest),
            "show" => {
                print_form(form);
                Ok(())
            }
            "clear" => {
                menu_item::clear_form(form);
                println!("form cleared");
                Ok(())
            }

            // --- store round-trips -----------------------------------------
            "categories" => runtime
                .block_on(menu_item::load_categories(db, form))
                .map(|categories| {
                    for c in categories {
                        println!("  {}", c.name);
                    }
                }),
            "list" => runtime
                .block_on(menu_item::search_items(db, form, ""))
                .map(|count| {
                    println!("{count} item(s)");
                    print_form(form);
                }),
            "search" => runtime
                .block_on(menu_item::search_items(db, form, rest))
                .map(|count| {
                    println!("{count} matching item(s)");
                    print_form(form);
                }),
            "next" => runtime.block_on(menu_item::show_next(db, form)).map(|moved| {
                match moved {
                    Some(_) => print_form(form),
                    None => println!("already on the last record"),
                }
            }),
            "prev" => runtime
                .block_on(menu_item::show_previous(db, form))
                .map(|moved| match moved {
                    Some(_) => print_form(form),
                    None => println!("already on the first record"),
                }),
            "insert" => runtime.block_on(menu_item::insert_item(db, form)).map(|item| {
                println!("✓ created {} ({})", item.name, item.id);
            }),
            "save" => runtime.block_on(menu_item::save_item(db, form)).map(|item| {
                println!("✓ saved {}", item.name);
            }),
            "delete" => delete_with_confirmation(runtime, db, form, &mut lines),
            "refresh" => runtime.block_on(menu_item::refresh(db, form)).map(|count| {
                println!("✓ refreshed, {count} item(s)");
                print_form(form);
            }),

            // --- report preview --------------------------------------------
            "print" => runtime
                .block_on(report::preview_item(db, form, reports_dir))
                .map(|v| {
                    println!("✓ report rendered ({} page(s)) — preview open", v.page_count());
                    viewer = Some(v);
                }),
            "pnext" | "pprev" | "zoom+" | "zoom-" | "savepdf" | "lpr" | "close" => {
                drive_viewer(&mut viewer, command, rest)
            }

            _ => {
                println!("unknown command '{command}' — type 'help'");
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("✗ {}", e.message);
        }
    }

    Ok(())
}

/// Viewer sub-commands; all require an open preview.
fn drive_viewer(
    viewer: &mut Option<ReportViewer>,
    command: &str,
    rest: &str,
) -> Result<(), ApiError> {
    let Some(v) = viewer.as_mut() else {
        return Err(ApiError::validation("no preview open — use 'print' first"));
    };

    match command {
        "pnext" => {
            v.next_page();
            println!("page {}/{}", v.current_page() + 1, v.page_count());
        }
        "pprev" => {
            v.previous_page();
            println!("page {}/{}", v.current_page() + 1, v.page_count());
        }
        "zoom+" => {
            v.zoom_in();
            println!("zoom {}%", v.zoom_percent());
        }
        "zoom-" => {
            v.zoom_out();
            println!("zoom {}%", v.zoom_percent());
        }
        "savepdf" => {
            let dest = if rest.is_empty() { DEFAULT_SAVE_NAME } else { rest };
            let written = v.save_copy(dest)?;
            println!("✓ saved copy to {}", written.display());
        }
        "lpr" => {
            v.send_to_printer(&LpPrintQueue::new())?;
            println!("✓ submitted to print spooler");
        }
        "close" => {
            *viewer = None;
            println!("preview closed");
        }
        _ => unreachable!("viewer command filter"),
    }

    Ok(())
}

fn select_category(form: &FormState, name: &str) -> Result<(), ApiError> {
    let found = form.with_session_mut(|s| {
        let id = s.category_id_by_name(name);
        if let Some(id) = &id {
            s.fields_mut().category_id = Some(id.clone());
        }
        id
    });

    match found {
        Some(_) => Ok(()),
        None => Err(ApiError::validation(format!("unknown category '{name}'"))),
    }
}

fn load_image(form: &FormState, path: &str) -> Result<(), ApiError> {
    if path.is_empty() {
        // Bare `image` clears the pending picture
        form.with_session_mut(|s| {
            s.fields_mut().image = None;
            s.fields_mut().image_name = None;
        });
        println!("image cleared");
        return Ok(());
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ApiError::validation(format!("cannot read image '{path}': {e}")))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    form.with_session_mut(|s| {
        s.fields_mut().image = Some(bytes);
        s.fields_mut().image_name = file_name;
    });
    println!("image loaded");
    Ok(())
}

fn delete_with_confirmation(
    runtime: &Runtime,
    db: &Database,
    form: &FormState,
    lines: &mut dyn Iterator<Item = io::Result<String>>,
) -> Result<(), ApiError> {
    let name = form.with_session(|s| s.fields().name.clone());
    if form.with_session(|s| s.fields().id.is_none()) {
        return Err(ApiError::validation("No item selected to delete"));
    }

    print!("delete '{name}'? [y/N] ");
    let _ = io::stdout().flush();

    match lines.next() {
        Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y") => {
            runtime.block_on(menu_item::delete_item(db, form))?;
            println!("✓ deleted {name}");
            Ok(())
        }
        _ => {
            println!("delete cancelled");
            Ok(())
        }
    }
}

fn print_form(form: &FormState) {
    form.with_session(|s| {
        match s.position() {
            Some((n, total)) => println!("[{n}/{total}]"),
            None => println!("[form is empty]"),
        }
        let f = s.fields();
        println!("  id:          {}", f.id.as_deref().unwrap_or("(new)"));
        println!("  name:        {}", f.name);
        println!("  description: {}", f.description);
        println!("  price:       {}", f.price_input);
        let category = f
            .category_id
            .as_deref()
            .and_then(|id| s.categories().iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
            .unwrap_or("(none)");
        println!("  category:    {category}");
        match (&f.image, &f.image_name) {
            (Some(bytes), name) => println!(
                "  image:       {} ({} bytes)",
                name.as_deref().unwrap_or("unnamed"),
                bytes.len()
            ),
            (None, _) => println!("  image:       (none)"),
        }
    });
}

fn print_help() {
    println!(
        "\
commands:
  search <term>      filter items by name/category (empty = all)
  list               show every item
  next / prev        walk the result set
  show               print the form

  name <text>        edit the name field
  desc <text>        edit the description field
  price <amount>     edit the price field (e.g. 4.50)
  category <name>    pick a category
  image <path>       load an image file ('image' alone clears it)

  insert             create a new item from the form
  save               save edits to the shown item
  delete             delete the shown item (asks first)
  clear              clear the form
  refresh            reload categories and items
  categories         list the known categories

  print              render the shown item's report and open the preview
  pnext / pprev      preview page navigation
  zoom+ / zoom-      preview zoom (30%..300%)
  savepdf [path]     save a copy of the report
  lpr                submit the report to the print spooler
  close              close the preview

  quit               leave"
    );
}
