/* ===============================================================================
Restaurant menu bot.
User interface with inline buttons. 27 May 2021.
----------------------------------------------------------------------------
Licensed under the terms of the GPL version 3.
http://www.gnu.org/licenses/gpl-3.0.html
Copyright (c) 2020-2026 by Artem Khomenko _mag12@yahoo.com.
=============================================================================== */

use teloxide::{
   prelude::*,
   types::{InputFile, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode, ChatId, },
   utils::html,
};
use url::Url;

use crate::callback::Command;
use crate::dish::*;
use crate::environment as env;
use crate::states::*;
use crate::store::Store;
use crate::loc::*;

// Longer captions take the whole row
const SHORT_CAPTION: usize = 21;

// Which list the user came from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Listing {
   All, // whole menu
   Specials, // chef specials only
}

// Screens with their parameters
#[derive(Clone, Debug)]
pub enum Route {
   Home,
   Menu,
   ChefSpecials,
   Detail { dish: Dish, back: Listing },
   Admin,
}

impl Listing {
   pub fn select(self, store: &Store) -> Vec<Dish> {
      match self {
         Listing::All => store.items(),
         Listing::Specials => store.specials(),
      }
   }

   pub fn route(self) -> Route {
      match self {
         Listing::All => Route::Menu,
         Listing::Specials => Route::ChefSpecials,
      }
   }
}

// Screens without dialogue state
pub async fn show(bot: &Bot, chat_id: ChatId, store: &Store, route: Route) -> HandlerResult {
   match route {
      Route::Menu => enter(bot, chat_id, store, Listing::All).await,
      Route::ChefSpecials => enter(bot, chat_id, store, Listing::Specials).await,
      Route::Detail { dish, back } => view(bot, chat_id, &dish, back).await,
      Route::Home | Route::Admin => {
         log::error!("navigation::show {:?} needs dialogue", route);
         Ok(())
      }
   }
}

// Send the list of dishes
pub async fn enter(bot: &Bot, chat_id: ChatId, store: &Store, listing: Listing) -> HandlerResult {
   let items = listing.select(store);

   bot.send_message(chat_id, list_text(&items, listing))
   .reply_markup(list_markup(&items, listing))
   .parse_mode(ParseMode::Html)
   .disable_notification(true)
   .await?;

   Ok(())
}

// Dish card with picture if Telegram accepts the link
pub async fn view(bot: &Bot, chat_id: ChatId, dish: &Dish, back: Listing) -> HandlerResult {
   let text = dish_text(dish);
   let markup = back_markup(back);

   let sent = match Url::parse(dish.image_or_placeholder()) {
      Ok(url) => {
         let res = bot.send_photo(chat_id, InputFile::url(url))
         .caption(text.clone())
         .parse_mode(ParseMode::Html)
         .reply_markup(markup.clone())
         .disable_notification(true)
         .await;

         match res {
            Ok(_) => true,
            Err(err) => {
               log::info!("navigation::view picture for dish {}: {}", dish.id, err);
               false
            }
         }
      }
      Err(err) => {
         log::info!("navigation::view wrong link for dish {}: {}", dish.id, err);
         false
      }
   };

   // Without picture
   if !sent {
      bot.send_message(chat_id, text)
      .reply_markup(markup)
      .parse_mode(ParseMode::Html)
      .disable_notification(true)
      .await?;
   }

   Ok(())
}

// Selected dish has gone
pub async fn view_missing(bot: &Bot, chat_id: ChatId, back: Listing) -> HandlerResult {
   bot.send_message(chat_id, loc(Key::NavigationNoItem, &[]))
   .reply_markup(back_markup(back))
   .disable_notification(true)
   .await?;
   Ok(())
}

pub fn list_text(items: &[Dish], listing: Listing) -> String {
   let (title, empty) = match listing {
      Listing::All => (Key::NavigationMenuTitle, Key::NavigationMenuEmpty),
      Listing::Specials => (Key::NavigationSpecialsTitle, Key::NavigationSpecialsEmpty),
   };

   let title = loc(title, &[]);
   if items.is_empty() {
      return format!("{}\n{}", title, loc(empty, &[]));
   }

   let lines = items.iter()
   .map(|dish| {
      let mut res = format!("\n<b>{}</b>", html::escape(&dish.name));

      // Course is optional
      if !dish.course.is_empty() {
         res = res + "\n<i>" + html::escape(&dish.course).as_str() + "</i>";
      }

      if !dish.descr.is_empty() {
         res = res + "\n" + html::escape(&dish.descr).as_str();
      }

      res + "\n" + html::escape(&env::price_with_unit(&dish.price)).as_str()
   });

   join_limited(title, lines)
}

pub fn dish_text(dish: &Dish) -> String {
   let mut res = format!("<b>{}</b>", html::escape(&dish.name));

   if dish.is_special {
      res = res + "\n" + loc(Key::NavigationSpecialBadge, &[]).as_str();
   }

   let sections = [
      (Key::NavigationDescription, html::escape(&dish.descr)),
      (Key::NavigationIngredients, html::escape(dish.ingredients_or_fallback())),
      (Key::NavigationPrice, html::escape(&env::price_with_unit(&dish.price))),
   ];

   sections.iter()
   .fold(res, |acc, (header, body)| {
      format!("{}\n\n{}\n{}", acc, loc(*header, &[]), body)
   })
}

pub fn title_with_price(dish: &Dish) -> String {
   format!("{} · {}", dish.name, env::price_with_unit(&dish.price))
}

pub fn list_markup(items: &[Dish], listing: Listing) -> InlineKeyboardMarkup {
   // Create buttons for each dish
   let buttons: Vec<InlineKeyboardButton> = items
   .iter()
   .map(|dish| {
      InlineKeyboardButton::callback(
         title_with_price(dish),
         Command::detail(listing, dish.id).data(),
   )})
   .collect();

   // Separate into long and short
   let (long, short) : (Vec<_>, Vec<_>) = buttons
   .into_iter()
   .partition(|n| n.text.chars().count() > SHORT_CAPTION);

   // Long buttons by one in row
   let markup = long.into_iter()
   .fold(InlineKeyboardMarkup::default(), |acc, item| acc.append_row(vec![item]));

   // Short by two, the last may be unpaired
   short.chunks(2)
   .fold(markup, |acc, pair| acc.append_row(pair.to_vec()))
}

pub fn back_markup(back: Listing) -> InlineKeyboardMarkup {
   let button_back = InlineKeyboardButton::callback(
      loc(Key::NavigationBack, &[]), // "⏪Back"
      Command::back(back).data(),
   );
   InlineKeyboardMarkup::default()
   .append_row(vec![button_back])
}

#[cfg(test)]
mod tests {
   use super::*;
   use teloxide::types::InlineKeyboardButtonKind;

   fn callbacks(markup: &InlineKeyboardMarkup) -> Vec<String> {
      markup.inline_keyboard.iter()
      .flatten()
      .filter_map(|button| match &button.kind {
         InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
         _ => None,
      })
      .collect()
   }

   #[test]
   fn specials_screen_shows_two_seed_dishes() {
      let items = Listing::Specials.select(&Store::new(seed()));
      let text = list_text(&items, Listing::Specials);

      assert!(text.starts_with("<b>Chef Specials</b>"));
      let burger = text.find("Cheeseburger").unwrap();
      let ribs = text.find("BBQ Ribs").unwrap();
      assert!(burger < ribs);
      assert!(!text.contains("Nachos"));

      let markup = list_markup(&items, Listing::Specials);
      let mut data = callbacks(&markup);
      data.sort();
      assert_eq!(data, vec!["dts3", "dts4"]);
   }

   #[test]
   fn menu_lists_every_dish_in_order() {
      let items = Listing::All.select(&Store::new(seed()));
      let text = list_text(&items, Listing::All);

      let positions: Vec<usize> = items.iter()
      .map(|d| text.find(&format!("<b>{}</b>", d.name)).unwrap())
      .collect();
      assert!(positions.windows(2).all(|w| w[0] < w[1]));
      assert!(text.contains("<i>Appetizer</i>"));
      assert!(text.contains("R50"));

      let markup = list_markup(&items, Listing::All);
      assert_eq!(callbacks(&markup).len(), 8);
   }

   #[test]
   fn empty_lists_have_own_text() {
      assert_eq!(list_text(&[], Listing::All), "<b>Menu</b>\nNo dishes yet.");
      assert_eq!(list_text(&[], Listing::Specials), "<b>Chef Specials</b>\nNo specials available.");
      assert!(list_markup(&[], Listing::All).inline_keyboard.is_empty());

      let plain = seed().into_iter().filter(|d| !d.is_special).collect();
      assert!(Listing::Specials.select(&Store::new(plain)).is_empty());
   }

   #[test]
   fn short_buttons_go_in_pairs() {
      let markup = list_markup(&seed(), Listing::All);
      for row in &markup.inline_keyboard {
         let long = row.iter().any(|b| b.text.chars().count() > SHORT_CAPTION);
         if long {
            assert_eq!(row.len(), 1);
         } else {
            assert!(row.len() <= 2);
         }
      }
   }

   #[test]
   fn detail_has_fallback_ingredients_and_badge() {
      let mut dish = seed().remove(2);
      dish.ingredients.clear();
      let text = dish_text(&dish);

      assert!(text.starts_with("<b>Cheeseburger</b>\n<i>Chef's Special</i>"));
      assert!(text.contains("<b>Ingredients</b>\nChef’s secret!"));
      assert!(text.ends_with("<b>Price</b>\nR60"));

      let plain = seed().remove(0);
      assert!(!dish_text(&plain).contains("Chef's Special"));
   }

   #[test]
   fn user_text_is_escaped() {
      let dish = Dish {
         name: String::from("Fish & <Chips>"),
         ..seed().remove(0)
      };
      assert!(dish_text(&dish).starts_with("<b>Fish &amp; &lt;Chips&gt;</b>"));
   }

   #[test]
   fn back_returns_to_origin() {
      assert_eq!(callbacks(&back_markup(Listing::All)), vec!["bka"]);
      assert_eq!(callbacks(&back_markup(Listing::Specials)), vec!["bks"]);
      assert!(matches!(Listing::Specials.route(), Route::ChefSpecials));
   }
}
