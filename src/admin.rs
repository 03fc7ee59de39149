/* ===============================================================================
Restaurant menu bot.
Admin panel, editing the menu. 12 Oct 2026.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use std::{convert::Infallible, sync::Arc, };
use strum::IntoEnumIterator;
use teloxide::{prelude::*,
   types::{ReplyMarkup, ParseMode, InlineKeyboardButton, InlineKeyboardMarkup, ChatId, MessageId, User, UserId, },
   utils::html,
};

use crate::states::*;
use crate::callback as cb;
use crate::dish::*;
use crate::draft::{self, Draft, DraftError, Field, Submitted, };
use crate::environment as env;
use crate::navigation::{self, Listing, };
use crate::store::Store;
use crate::loc::*;

// ============================================================================
// [Main entry]
// ============================================================================

// Form values may be up to a whole message long
const PREVIEW_LEN: usize = 200;

// Panel commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
   Edit(Field), // enter a value for the field
   Special, // toggle special flag
   Save, // add or update the dish
   Clear, // remove all dishes
   View, // show menu as the customer sees it
   Exit, // return to start menu
   Load(DishId), // copy dish into the form
   Delete(DishId),
   Unknown,
}

impl Command {
   fn parse(s: &str) -> Self {
      // Try as command without arguments
      if let Some(field) = Field::iter().find(|f| f.as_ref() == s) { Self::Edit(field) }
      else if s == loc(Key::AdminSpecial, &[]) { Self::Special }
      else if s == loc(Key::AdminCommandSave, &[]) { Self::Save }
      else if s == loc(Key::AdminCommandUpdate, &[]) { Self::Save }
      else if s == loc(Key::AdminCommandClear, &[]) { Self::Clear }
      else if s == loc(Key::AdminCommandView, &[]) { Self::View }
      else if s == loc(Key::AdminCommandExit, &[]) { Self::Exit }
      else {
         // Looking for the commands with arguments
         let edit = loc(Key::AdminCommandEdit, &[]);
         let delete = loc(Key::AdminCommandDelete, &[]);
         if let Some(id) = s.strip_prefix(edit.as_str()).and_then(|r| r.parse().ok()) {
            Self::Load(id)
         } else if let Some(id) = s.strip_prefix(delete.as_str()).and_then(|r| r.parse().ok()) {
            Self::Delete(id)
         } else {
            Self::Unknown
         }
      }
   }
}

#[derive(Clone)]
pub struct AdminState {
   pub prev_state: MainState,
   pub draft: Draft,
}

pub async fn enter(bot: &Bot, chat_id: ChatId, dialogue: &MyDialogue, state: MainState, store: &Store) -> HandlerResult {
   // New session of editing starts with blank form
   let state = AdminState { prev_state: state, draft: Draft::default() };
   dialogue.update(state.clone()).await?;
   view(bot, chat_id, &state, store).await
}

async fn view(bot: &Bot, chat_id: ChatId, state: &AdminState, store: &Store) -> HandlerResult {
   let items = store.items();
   bot.send_message(chat_id, panel_text(&state.draft, &items))
   .reply_markup(markup(&state.draft))
   .parse_mode(ParseMode::Html)
   .disable_notification(true)
   .await?;
   Ok(())
}

pub async fn update(bot: Bot, msg: Message, dialogue: MyDialogue, state: AdminState, store: Arc<Store>) -> HandlerResult {
   let chat_id = msg.chat.id;
   let mut state = state;

   // Parse and handle commands
   let input = msg.text().unwrap_or_default();
   let cmd = Command::parse(input);
   match cmd {
      Command::Edit(field) => {
         let new_state = AdminStateEditing { prev_state: state, field };
         dialogue.update(new_state.to_owned()).await?;
         enter_edit(&bot, chat_id, &new_state).await
      }

      Command::Special => {
         // No input required, just toggle
         state.draft.toggle_special();
         dialogue.update(state.to_owned()).await?;
         view(&bot, chat_id, &state, &store).await
      }

      Command::Save => {
         let res = store.transact(|items, ids| state.draft.submit(items, ids));
         let (key, id) = match res {
            Ok(Submitted::Added(id)) => (Key::AdminAdded, id),
            Ok(Submitted::Updated(id)) => (Key::AdminUpdated, id),
            Ok(Submitted::Gone(id)) => {
               // Values stay, the next save adds them as a new dish
               state.draft.editing = None;
               dialogue.update(state.to_owned()).await?;

               let text = loc(Key::AdminGone, &[&id]);
               bot.send_message(chat_id, text).await?;
               return view(&bot, chat_id, &state, &store).await;
            }
            Err(DraftError::Required) => {
               // Form keeps the entered values
               bot.send_message(chat_id, loc(Key::AdminValidation, &[]))
               .reply_markup(markup(&state.draft))
               .await?;
               return Ok(());
            }
         };

         // Report to service chat
         let who = user_name(msg.from.as_ref(), state.prev_state.user_id);
         let text = loc(Key::LogSaved, &[&who, &id, &state.draft.name.trim()]);
         log::info!("{}", text);
         env::log(&text).await;

         // Blank form for the next dish
         state.draft.reset();
         dialogue.update(state.to_owned()).await?;

         bot.send_message(chat_id, loc(key, &[])).await?;
         view(&bot, chat_id, &state, &store).await
      }

      Command::Clear => {
         // "Clear all menu items?"
         bot.send_message(chat_id, loc(Key::ConfirmClear, &[]))
         .reply_markup(confirm_markup(cb::Command::ClearNo, Key::ConfirmButtonClear, cb::Command::ClearYes))
         .await?;
         Ok(())
      }

      Command::View => navigation::enter(&bot, chat_id, &store, Listing::All).await,

      Command::Exit => reload(&bot, chat_id, &dialogue, state.prev_state, loc(Key::AdminExit, &[])).await,

      Command::Load(id) => {
         match store.find(id) {
            Some(dish) => {
               state.draft.load_for_edit(&dish);
               dialogue.update(state.to_owned()).await?;

               // "Dish '{}' loaded into the form..."
               let text = loc(Key::AdminLoaded, &[&dish.name]);
               bot.send_message(chat_id, text).await?;
               view(&bot, chat_id, &state, &store).await
            }
            None => no_dish(&bot, chat_id, id).await,
         }
      }

      Command::Delete(id) => {
         match store.find(id) {
            Some(dish) => {
               // "Remove this dish?"
               let text = loc(Key::ConfirmRemove, &[&html::escape(&dish.name)]);
               bot.send_message(chat_id, text)
               .reply_markup(confirm_markup(cb::Command::RemoveNo(id), Key::ConfirmButtonRemove, cb::Command::RemoveYes(id)))
               .parse_mode(ParseMode::Html)
               .await?;
               Ok(())
            }
            None => no_dish(&bot, chat_id, id).await,
         }
      }

      Command::Unknown => {
         let text = if msg.text().is_none() {
            loc(Key::CommonTextPlease, &[])
         } else {
            loc(Key::AdminUnknown, &[&input])
         };
         bot.send_message(chat_id, text)
         .reply_markup(markup(&state.draft))
         .await?;
         Ok(())
      }
   }
}

async fn no_dish(bot: &Bot, chat_id: ChatId, id: DishId) -> HandlerResult {
   let text = loc(Key::AdminNoDish, &[&id]);
   bot.send_message(chat_id, text).await?;
   Ok(())
}

fn user_name(user: Option<&User>, user_id: UserId) -> String {
   match user {
      Some(user) => format!("{} ({})", user.full_name(), user.id),
      None => format!("user {}", user_id),
   }
}

// Beginning of the long value
fn preview(s: &str) -> String {
   if s.chars().count() > PREVIEW_LEN {
      let res: String = s.chars().take(PREVIEW_LEN).collect();
      res + "…"
   } else {
      String::from(s)
   }
}

pub fn panel_text(draft: &Draft, items: &[Dish]) -> String {
   let mut head = loc(Key::AdminTitle, &[]);

   // Update or add
   if let Some(id) = draft.editing {
      head = head + "\n" + loc(Key::AdminEditingMark, &[&id]).as_str();
   }

   // Fields of the form
   let head = Field::iter()
   .fold(head, |acc, field| {
      let value = match draft.get(field) {
         "" => String::from("-"),
         s => html::escape(&preview(s)),
      };
      format!("{}\n{}: {}", acc, field.as_ref(), value)
   });

   let special = if draft.is_special { Key::AdminYes } else { Key::AdminNo };
   let head = format!("{}\n{}: {}\n\n{}",
      head,
      loc(Key::AdminSpecial, &[]),
      loc(special, &[]),
      loc(Key::AdminCurrent, &[&items.len()])
   );

   if items.is_empty() {
      return format!("{}\n{}", head, loc(Key::AdminNoDishes, &[]));
   }

   join_limited(head, items.iter().map(dish_line))
}

// Short info with commands
fn dish_line(dish: &Dish) -> String {
   let course = if dish.course.is_empty() { String::default() }
   else { format!("{} • ", html::escape(&dish.course)) };

   let special = if dish.is_special { format!(" {}", loc(Key::AdminSpecialMark, &[])) }
   else { String::default() };

   // "<b>{}</b>\n{}{}{} /edit{} /del{}"
   let args: Args = &[
      &html::escape(&dish.name),
      &course,
      &html::escape(&env::price_with_unit(&dish.price)),
      &special,
      &dish.id,
      &dish.id,
   ];
   loc(Key::AdminDishLine, args)
}

fn markup(draft: &Draft) -> ReplyMarkup {
   let fields: Vec<String> = Field::iter()
   .map(|f| String::from(f.as_ref()))
   .collect();
   let (row1, row2) = fields.split_at(4);

   let mut row2 = row2.to_vec();
   row2.push(loc(Key::AdminSpecial, &[]));

   let save = if draft.editing.is_some() { Key::AdminCommandUpdate } else { Key::AdminCommandSave };
   let row3 = vec![
      loc(save, &[]),
      loc(Key::AdminCommandClear, &[]),
      loc(Key::AdminCommandView, &[]),
      loc(Key::AdminCommandExit, &[]),
   ];

   let keyboard = vec![row1.to_vec(), row2, row3];
   kb_markup(keyboard)
}

// Two choices, safe one goes first
fn confirm_markup(cancel: cb::Command, caption: Key, confirm: cb::Command) -> InlineKeyboardMarkup {
   let buttons = vec![
      InlineKeyboardButton::callback(loc(Key::ConfirmButtonCancel, &[]), cancel.data()),
      InlineKeyboardButton::callback(loc(caption, &[]), confirm.data()),
   ];
   InlineKeyboardMarkup::default()
   .append_row(buttons)
}

// ============================================================================
// [Confirmations from inline buttons]
// ============================================================================

// Menu after the answer to the prompt, only confirmations change it
pub fn answer(cmd: &cb::Command, items: &[Dish]) -> Vec<Dish> {
   match cmd {
      cb::Command::RemoveYes(id) => draft::remove(*id, items),
      cb::Command::ClearYes => draft::clear(items),
      _ => items.to_vec(),
   }
}

pub async fn confirmation(bot: &Bot, origin: (ChatId, MessageId), state: State, store: &Store, cmd: cb::Command, user: &User) -> Result<String, BoxError> {
   let (chat_id, message_id) = origin;

   // Apply to the current menu, not to the one at the moment of question
   let removed = if cmd == cb::Command::ClearYes {
      // Result does not depend on concurrent changes
      let current = store.items();
      store.replace_all(answer(&cmd, &current));
      current
   } else {
      store.transact(|items, _| {
         let res = answer(&cmd, items);
         let removed: Vec<Dish> = items.iter()
         .filter(|d| !res.contains(d))
         .cloned()
         .collect();
         Ok::<_, Infallible>((res, removed))
      })?
   };

   let who = user_name(Some(user), user.id);
   let (text, report) = match cmd {
      cb::Command::RemoveYes(id) => {
         let name = removed.first()
         .map(|d| d.name.clone())
         .unwrap_or_else(|| id.to_string());
         let report = loc(Key::LogRemoved, &[&who, &name]);
         (loc(Key::ConfirmRemoved, &[]), Some(report))
      }
      cb::Command::ClearYes => {
         log::info!("admin::confirmation {} dishes removed", removed.len());
         let report = loc(Key::LogCleared, &[&who]);
         (loc(Key::ConfirmCleared, &[]), Some(report))
      }
      _ => (loc(Key::ConfirmCancelled, &[]), None),
   };

   // Without buttons, to prevent second answer
   bot.edit_message_text(chat_id, message_id, &text).await?;

   if let Some(report) = report {
      log::info!("{}", report);
      env::log(&report).await;

      // Refresh the panel if user still there
      if let State::Admin(state) = state {
         view(bot, chat_id, &state, store).await?;
      }
   }

   Ok(text)
}

// ============================================================================
// [Fields editing mode]
// ============================================================================
#[derive(Clone)]
pub struct AdminStateEditing {
   prev_state: AdminState,
   field: Field,
}

async fn enter_edit(bot: &Bot, chat_id: ChatId, state: &AdminStateEditing) -> HandlerResult {
   // "Enter {} (- to leave empty, / to cancel), current value: {}"
   let current = preview(state.prev_state.draft.get(state.field));
   let text = loc(Key::AdminEnterEdit, &[&state.field.as_ref().to_lowercase(), &current]);

   bot.send_message(chat_id, text)
   .reply_markup(cancel_markup())
   .await?;

   Ok(())
}

pub async fn update_edit(bot: Bot, msg: Message, dialogue: MyDialogue, state: AdminStateEditing, store: Arc<Store>) -> HandlerResult {
   let chat_id = msg.chat.id;

   // Only text goes into the form
   let input = match msg.text() {
      Some(input) => input,
      None => {
         let text = loc(Key::CommonTextPlease, &[]);
         bot.send_message(chat_id, text)
         .reply_markup(cancel_markup())
         .await?;
         return Ok(());
      }
   };

   let field = state.field;
   let mut new_state = state.prev_state;
   let text = if input == loc(Key::CommonCancel, &[]) {
      // "Cancel, value not changed"
      loc(Key::AdminUpdateEdit1, &[])
   } else {
      let value = if input == loc(Key::AdminCommandEmpty, &[]) { String::default() }
      else { input.to_string() };
      new_state.draft.set(field, value);

      // "{} changed"
      loc(Key::AdminUpdateEdit2, &[&field.as_ref()])
   };

   bot.send_message(chat_id, text).await?;

   // Return to the panel
   dialogue.update(new_state.to_owned()).await?;
   view(&bot, chat_id, &new_state, &store).await
}
