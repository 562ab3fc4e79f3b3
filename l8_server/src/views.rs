/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! HTML page rendering. All pages share the same header, nav and footer partials and link
//! to the site's static assets (css, images) under `static_url`

use std::fmt::Write;
use http::StatusCode;

use l8_common::strings::html_escape;
use crate::{helpers::{FeaturedScene, SceneDetails, SceneSummary}, SiteContext};

pub const SITE_TITLE: &str = "Landsat on AWS";

// write! into a String can't fail

fn header (buf: &mut String, site: &SiteContext, title: &str) {
    let static_url = &site.static_url;
    let _ = write!( buf, "<!DOCTYPE html>\n");
    let _ = write!( buf, "<html lang=\"en\">\n");
    let _ = write!( buf, "<head>\n");
    let _ = write!( buf, "<meta charset=\"utf-8\">\n");
    let _ = write!( buf, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = write!( buf, "<title>{}</title>\n", html_escape(title));
    let _ = write!( buf, "<link rel=\"stylesheet\" type=\"text/css\" href=\"{static_url}styles/main.css\"/>\n");
    let _ = write!( buf, "<link rel=\"icon\" href=\"{static_url}images/favicon.ico\"/>\n");
    let _ = write!( buf, "</head>\n");
    let _ = write!( buf, "<body>\n");
}

fn nav (buf: &mut String, site: &SiteContext) {
    let bp = &site.base_path;
    let _ = write!( buf, "<nav class=\"site-nav\">\n");
    let _ = write!( buf, "<a class=\"site-title\" href=\"{bp}/\">{SITE_TITLE}</a>\n");
    let _ = write!( buf, "<ul>\n");
    let _ = write!( buf, "<li><a href=\"{bp}/\">Home</a></li>\n");
    let _ = write!( buf, "<li><a href=\"{bp}/L8/\">Landsat 8</a></li>\n");
    let _ = write!( buf, "</ul>\n");
    let _ = write!( buf, "</nav>\n");
}

fn footer (buf: &mut String, site: &SiteContext) {
    let _ = write!( buf, "<footer class=\"site-footer\">\n");
    let _ = write!( buf, "<p>Landsat 8 imagery courtesy of the U.S. Geological Survey. Data hosted in the <a href=\"{}/\">{}</a> bucket.</p>\n",
                    site.landsat_url, html_escape(&site.landsat_bucket));
    let _ = write!( buf, "</footer>\n");
    let _ = write!( buf, "</body>\n");
    let _ = write!( buf, "</html>\n");
}

/// wrap a page body with the common partials
fn page (site: &SiteContext, title: &str, body: impl FnOnce(&mut String))->String {
    let mut buf = String::with_capacity(8192);
    header( &mut buf, site, title);
    nav( &mut buf, site);
    let _ = write!( buf, "<main>\n");
    body( &mut buf);
    let _ = write!( buf, "</main>\n");
    footer( &mut buf, site);
    buf
}

/// main page with featured scenes
pub fn index_page (site: &SiteContext, featured: &[FeaturedScene])->String {
    let bp = &site.base_path;
    page( site, SITE_TITLE, |buf| {
        let _ = write!( buf, "<h1>{SITE_TITLE}</h1>\n");
        let _ = write!( buf, "<p>Landsat 8 scenes are available from the <a href=\"{bp}/L8/\">path/row index</a>.</p>\n");
        let _ = write!( buf, "<h2>Featured scenes</h2>\n");
        let _ = write!( buf, "<ul class=\"featured\">\n");
        for s in featured {
            let (id, path, row) = (html_escape(&s.id), html_escape(&s.path), html_escape(&s.row));
            let _ = write!( buf, "<li><a href=\"{bp}/L8/{path}/{row}/{id}/\">");
            let _ = write!( buf, "<img src=\"{}/L8/{path}/{row}/{id}/{id}_thumb_small.jpg\" alt=\"{id}\"/>", site.landsat_url);
            let _ = write!( buf, "<span class=\"scene-id\">{id}</span> <span class=\"date\">{}</span> <span class=\"cloud\">cloud cover: {}</span>",
                            html_escape(&s.date), html_escape(&s.cloud_cover));
            let _ = write!( buf, "</a></li>\n");
        }
        let _ = write!( buf, "</ul>\n");
    })
}

/// list of all paths
pub fn sensor_page (site: &SiteContext, paths: &[String])->String {
    let bp = &site.base_path;
    page( site, &format!("{SITE_TITLE} - L8"), |buf| {
        let _ = write!( buf, "<h1>Landsat 8 Paths</h1>\n");
        let _ = write!( buf, "<ul class=\"paths\">\n");
        for p in paths {
            let p = html_escape(p);
            let _ = write!( buf, "<li><a href=\"{bp}/L8/{p}/\">{p}</a></li>\n");
        }
        let _ = write!( buf, "</ul>\n");
    })
}

/// rows of a single path
pub fn path_page (site: &SiteContext, path: &str, rows: &[String])->String {
    let bp = &site.base_path;
    let title = format!("{SITE_TITLE} - L8 - Rows for Path {path}");
    let path = html_escape(path);
    page( site, &title, |buf| {
        let _ = write!( buf, "<h1>Rows for Path {path}</h1>\n");
        let _ = write!( buf, "<ul class=\"rows\">\n");
        for r in rows {
            let r = html_escape(r);
            let _ = write!( buf, "<li><a href=\"{bp}/L8/{path}/{r}/\">{r}</a></li>\n");
        }
        let _ = write!( buf, "</ul>\n");
    })
}

/// scenes of a path/row, newest first. The first scene is highlighted
pub fn pathrow_page (site: &SiteContext, path: &str, row: &str, scenes: &[SceneSummary])->String {
    let bp = &site.base_path;
    let title = format!("{SITE_TITLE} - L8 - Scenes for Path {path} / Row {row}");
    let (path, row) = (html_escape(path), html_escape(row));
    page( site, &title, |buf| {
        let _ = write!( buf, "<h1>Scenes for Path {path} / Row {row}</h1>\n");

        if let Some(last) = scenes.first() {
            let id = html_escape(&last.id);
            let _ = write!( buf, "<section class=\"last-scene\">\n");
            let _ = write!( buf, "<h2>Last scene</h2>\n");
            let _ = write!( buf, "<a href=\"{bp}/L8/{path}/{row}/{id}/\"><img src=\"{}/L8/{path}/{row}/{id}/{id}_thumb_large.jpg\" alt=\"{id}\"/></a>\n", site.landsat_url);
            let _ = write!( buf, "<p>{id} - {} - cloud cover: {}%</p>\n", html_escape(&last.date), last.cloud_cover);
            let _ = write!( buf, "</section>\n");
        } else {
            let _ = write!( buf, "<p>no scenes available</p>\n");
        }

        let _ = write!( buf, "<table class=\"scenes\">\n");
        let _ = write!( buf, "<tr><th>Scene</th><th>Date</th><th>Cloud cover</th></tr>\n");
        for s in scenes {
            let id = html_escape(&s.id);
            let _ = write!( buf, "<tr><td><a href=\"{bp}/L8/{path}/{row}/{id}/\">{id}</a></td><td>{}</td><td>{}%</td></tr>\n",
                            html_escape(&s.date), s.cloud_cover);
        }
        let _ = write!( buf, "</table>\n");
    })
}

fn file_list (buf: &mut String, heading: &str, base_url: &str, files: &[String]) {
    if files.is_empty() { return }

    let _ = write!( buf, "<h3>{heading}</h3>\n");
    let _ = write!( buf, "<ul class=\"files\">\n");
    for f in files {
        let f = html_escape(f);
        let _ = write!( buf, "<li><a href=\"{base_url}{f}\">{f}</a></li>\n");
    }
    let _ = write!( buf, "</ul>\n");
}

/// details of a single scene with links to its files in the Landsat bucket
pub fn scene_page (site: &SiteContext, scene: &SceneDetails)->String {
    let bp = &site.base_path;
    let title = format!("{SITE_TITLE} - {}", scene.id);
    let (id, path, row) = (html_escape(&scene.id), html_escape(&scene.path), html_escape(&scene.row));
    let files_url = format!("{}/L8/{path}/{row}/{id}/", site.landsat_url);

    page( site, &title, |buf| {
        let _ = write!( buf, "<h1>{id}</h1>\n");
        let _ = write!( buf, "<p><a href=\"{bp}/L8/{path}/{row}/\">Path {path} / Row {row}</a></p>\n");
        let _ = write!( buf, "<img class=\"thumbnail\" src=\"{}\" alt=\"{id}\"/>\n", html_escape(&scene.thumbnail));
        let _ = write!( buf, "<dl>\n");
        let _ = write!( buf, "<dt>Acquisition date</dt><dd>{}</dd>\n", html_escape(&scene.date));
        let _ = write!( buf, "<dt>Cloud cover</dt><dd>{}%</dd>\n", scene.cloud_cover);
        let _ = write!( buf, "</dl>\n");

        let _ = write!( buf, "<h2>Files</h2>\n");
        file_list( buf, "GeoTIFFs", &files_url, &scene.files.tiffs);
        file_list( buf, "Overviews", &files_url, &scene.files.overviews);
        file_list( buf, "Previews", &files_url, &scene.files.previews);
        file_list( buf, "Metadata", &files_url, &scene.files.metadata);
    })
}

/// page for failed requests
pub fn error_page (site: &SiteContext, status: StatusCode)->String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let title = format!("{SITE_TITLE} - {reason}");
    page( site, &title, |buf| {
        let _ = write!( buf, "<h1>{} {reason}</h1>\n", status.as_u16());
        if status == StatusCode::NOT_FOUND {
            let _ = write!( buf, "<p>The requested page does not exist.</p>\n");
        } else {
            let _ = write!( buf, "<p>Sorry, we could not process this request.</p>\n");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site ()->SiteContext {
        SiteContext {
            base_path: "/dev".into(),
            static_url: "https://s3.amazonaws.com/landsat-site-static/".into(),
            landsat_url: "https://landsat-pds.s3.amazonaws.com".into(),
            landsat_bucket: "landsat-pds".into(),
        }
    }

    #[test]
    fn test_path_page() {
        let html = path_page( &site(), "044", &["033".to_string(), "034".to_string()]);
        assert!( html.contains("<title>Landsat on AWS - L8 - Rows for Path 044</title>"));
        assert!( html.contains("<a href=\"/dev/L8/044/034/\">034</a>"));
        assert!( html.contains("href=\"https://s3.amazonaws.com/landsat-site-static/styles/main.css\""));
        assert!( html.ends_with("</html>\n"));
    }

    #[test]
    fn test_error_page() {
        let html = error_page( &site(), StatusCode::NOT_FOUND);
        assert!( html.contains("<h1>404 Not Found</h1>"));
    }

    #[test]
    fn test_escaping() {
        let html = sensor_page( &site(), &["<b>".to_string()]);
        assert!( html.contains("&lt;b&gt;"));
        assert!( !html.contains("<b>"));
    }
}
