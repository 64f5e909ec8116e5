use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::layout;
use crate::models::{Fruit, FruitDetail, Season};

pub fn index_page(fruits: &[Fruit]) -> String {
    let mut body = String::from("<h1>Fruits</h1>\n<ul>\n");

    for fruit in fruits {
        body.push_str(&format!(
            "<li><a href=\"/fruits/{}\">{}</a></li>\n",
            fruit.id,
            text(&fruit.name)
        ));
    }

    body.push_str("</ul>\n<a href=\"/fruits/new\">Add a fruit</a>\n");
    layout("Fruits", &body)
}

pub fn show_page(detail: &FruitDetail) -> String {
    let fruit = &detail.fruit;
    let mut body = format!(
        "<h1>{name}</h1>\n<p>The {name} is {color}.</p>\n",
        name = text(&fruit.name),
        color = text(&fruit.color)
    );
    body.push_str(if fruit.ready_to_eat {
        "<p>It is ready to eat.</p>\n"
    } else {
        "<p>It is not ready to eat.</p>\n"
    });

    if let Some(owner) = &detail.owner {
        body.push_str(&format!("<p>Owned by {}</p>\n", text(owner)));
    }

    if !detail.seasons.is_empty() {
        body.push_str("<h2>Seasons</h2>\n<ul>\n");
        for season in &detail.seasons {
            body.push_str(&format!("<li>{}</li>\n", text(&season.name)));
        }
        body.push_str("</ul>\n");
    }

    body.push_str(&format!(
        "<a href=\"/fruits/{id}/edit\">Edit</a>\n<form action=\"/fruits/{id}?_method=DELETE\" method=\"POST\">\n<input type=\"submit\" value=\"Delete\">\n</form>\n",
        id = fruit.id
    ));
    body.push_str("<a href=\"/fruits\">Back to all fruits</a>\n");

    layout(&fruit.name, &body)
}

pub fn new_page() -> String {
    let body = format!(
        "<h1>New fruit</h1>\n<form action=\"/fruits\" method=\"POST\">\n{}<input type=\"submit\" value=\"Create\">\n</form>\n",
        fruit_fields("", "", false)
    );

    layout("New fruit", &body)
}

pub fn edit_page(fruit: &Fruit, seasons: &[Season]) -> String {
    let mut season_options = String::from("<option value=\"\">No season</option>\n");
    for season in seasons {
        season_options.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            season.id,
            text(&season.name)
        ));
    }

    let body = format!(
        "<h1>Edit {}</h1>\n<form action=\"/fruits/{}?_method=PUT\" method=\"POST\">\n{}<label>Season: <select name=\"season\">\n{}</select></label><br>\n<input type=\"submit\" value=\"Save\">\n</form>\n",
        text(&fruit.name),
        fruit.id,
        fruit_fields(&fruit.name, &fruit.color, fruit.ready_to_eat),
        season_options
    );

    layout(&format!("Edit {}", fruit.name), &body)
}

fn fruit_fields(name: &str, color: &str, ready_to_eat: bool) -> String {
    format!(
        "<label>Name: <input type=\"text\" name=\"name\" value=\"{}\"></label><br>\n<label>Color: <input type=\"text\" name=\"color\" value=\"{}\"></label><br>\n<label>Is ready to eat: <input type=\"checkbox\" name=\"readyToEat\"{}></label><br>\n",
        attr(name),
        attr(color),
        if ready_to_eat { " checked" } else { "" }
    )
}
