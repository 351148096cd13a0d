//! Project templates for the supported frameworks.
//!
//! Templates are compiled in: the framework set is closed, so each carries
//! its file set (with `{{project_name}}` substitution), install commands and
//! start command as constants.

use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::{info, warn};

use crate::domain::Framework;
use crate::error::{BoulevardError, Result};

struct TemplateFile {
    path: &'static str,
    content: &'static str,
}

struct Template {
    files: &'static [TemplateFile],
    install_commands: &'static [&'static str],
    start_command: &'static str,
}

const REACT: Template = Template {
    files: &[
        TemplateFile {
            path: "package.json",
            content: r#"{
  "name": "{{project_name}}",
  "version": "0.1.0",
  "private": true,
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0",
    "react-scripts": "5.0.1"
  },
  "scripts": {
    "start": "react-scripts start",
    "build": "react-scripts build"
  }
}
"#,
        },
        TemplateFile {
            path: "public/index.html",
            content: r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{{project_name}}</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#,
        },
        TemplateFile {
            path: "src/index.js",
            content: r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

const root = ReactDOM.createRoot(document.getElementById('root'));
root.render(<App />);
"#,
        },
        TemplateFile {
            path: "src/App.js",
            content: r#"function App() {
  return <h1>{{project_name}}</h1>;
}

export default App;
"#,
        },
    ],
    install_commands: &["npm install"],
    start_command: "npm start",
};

const VUE: Template = Template {
    files: &[
        TemplateFile {
            path: "package.json",
            content: r#"{
  "name": "{{project_name}}",
  "version": "0.1.0",
  "private": true,
  "dependencies": {
    "vue": "^3.4.0"
  },
  "devDependencies": {
    "vite": "^5.0.0",
    "@vitejs/plugin-vue": "^5.0.0"
  },
  "scripts": {
    "dev": "vite",
    "build": "vite build"
  }
}
"#,
        },
        TemplateFile {
            path: "index.html",
            content: r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{{project_name}}</title>
  </head>
  <body>
    <div id="app"></div>
    <script type="module" src="/src/main.js"></script>
  </body>
</html>
"#,
        },
        TemplateFile {
            path: "src/main.js",
            content: r#"import { createApp } from 'vue';
import App from './App.vue';

createApp(App).mount('#app');
"#,
        },
        TemplateFile {
            path: "src/App.vue",
            content: r#"<template>
  <h1>{{project_name}}</h1>
</template>
"#,
        },
    ],
    install_commands: &["npm install"],
    start_command: "npm run dev",
};

const FLASK: Template = Template {
    files: &[
        TemplateFile {
            path: "app.py",
            content: r#"from flask import Flask

app = Flask(__name__)


@app.route("/")
def index():
    return "{{project_name}} is running"


if __name__ == "__main__":
    app.run(debug=True)
"#,
        },
        TemplateFile {
            path: "requirements.txt",
            content: "flask>=3.0\n",
        },
    ],
    install_commands: &["pip install -r requirements.txt"],
    start_command: "python app.py",
};

const FASTAPI: Template = Template {
    files: &[
        TemplateFile {
            path: "main.py",
            content: r#"from fastapi import FastAPI

app = FastAPI(title="{{project_name}}")


@app.get("/")
def index():
    return {"project": "{{project_name}}"}
"#,
        },
        TemplateFile {
            path: "requirements.txt",
            content: "fastapi>=0.110\nuvicorn>=0.29\n",
        },
    ],
    install_commands: &["pip install -r requirements.txt"],
    start_command: "uvicorn main:app --reload",
};

fn template_for(framework: Framework) -> &'static Template {
    match framework {
        Framework::React => &REACT,
        Framework::Vue => &VUE,
        Framework::Flask => &FLASK,
        Framework::FastApi => &FASTAPI,
    }
}

/// Applies project templates and runs their install pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateManager;

impl TemplateManager {
    pub fn new() -> Self {
        Self
    }

    /// Materialize the framework's file set at `project_path`, substituting
    /// the project name.
    pub async fn apply_template(
        &self,
        framework: Framework,
        project_path: &Path,
        project_name: &str,
    ) -> Result<()> {
        let template = template_for(framework);
        fs::create_dir_all(project_path).await?;

        for file in template.files {
            let full_path = project_path.join(file.path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            let content = file.content.replace("{{project_name}}", project_name);
            fs::write(&full_path, content).await?;
        }

        info!(%framework, path = %project_path.display(), "applied template");
        Ok(())
    }

    /// Run the framework's install commands in the project directory,
    /// stopping at the first failure.
    pub async fn run_install_commands(
        &self,
        framework: Framework,
        project_path: &Path,
    ) -> Result<()> {
        for cmd in template_for(framework).install_commands {
            info!(command = cmd, "running install command");
            let output = Command::new("sh")
                .arg("-c")
                .arg(cmd)
                .current_dir(project_path)
                .output()
                .await?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!(command = cmd, %stderr, "install command failed");
                return Err(BoulevardError::Template(format!(
                    "Installation command failed: {cmd}"
                )));
            }
        }
        Ok(())
    }

    /// Command that starts a project of the given framework.
    pub fn get_start_command(&self, framework: Framework) -> Option<&'static str> {
        Some(template_for(framework).start_command)
    }

    /// All frameworks a template exists for.
    pub fn list_templates(&self) -> Vec<Framework> {
        Framework::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("boulevard-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn apply_template_substitutes_project_name() {
        let dir = scratch_dir();
        let manager = TemplateManager::new();
        manager
            .apply_template(Framework::Flask, &dir, "demo")
            .await
            .unwrap();

        let app = tokio::fs::read_to_string(dir.join("app.py")).await.unwrap();
        assert!(app.contains("demo is running"));
        assert!(dir.join("requirements.txt").exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[test]
    fn every_framework_has_a_start_command() {
        let manager = TemplateManager::new();
        for framework in manager.list_templates() {
            assert!(manager.get_start_command(framework).is_some());
        }
    }
}
