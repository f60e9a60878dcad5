//! Initialize a new portfolio site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Folio Configuration

# Site
title: Shivam Kumar | Site Reliability Engineer
subtitle: Site Reliability Engineer II
description: Building secure, scalable, and automated infrastructure.
keywords:
  - SRE
  - DevOps
  - Kubernetes
author: Shivam Kumar
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
blog_dir: blog
tag_dir: tags
data_dir: _data

# Writing
date_format: MMMM D, YYYY
excerpt_length: 160
words_per_minute: 200
"#;

const PROFILE: &str = r#"name: Shivam Kumar
initials: SK
role: Site Reliability Engineer II
greeting: "👋 Hello, I'm"
tagline: Building secure, scalable, and automated infrastructure that powers mission-critical systems at scale.

social:
  - { name: GitHub, href: "https://github.com/shivam2003-dev", icon: github }
  - { name: LinkedIn, href: "https://www.linkedin.com/in/shivam-kumar2003/", icon: linkedin }
  - { name: Email, href: "mailto:shivam.sk2003@gmail.com", icon: email }
  - { name: Resume, href: /resume.pdf, icon: pdf, download: true }

about:
  intro: Passionate about reliability, automation and infrastructure that scales.
  paragraphs:
    - title: Who I am
      body: Site Reliability Engineer focused on Kubernetes, AWS and infrastructure as code.
  highlights:
    - { icon: cogs, title: Infrastructure Automation, description: "Automated 50-100+ tasks from system maintenance to cloud provisioning" }
    - { icon: github_actions, title: CI/CD Excellence, description: "Built pipelines for 10+ microservices, reducing deployment time by 60%" }
    - { icon: shield, title: Security First, description: "Deployed Wazuh across 10+ environments with comprehensive monitoring" }
    - { icon: server, title: Disaster Recovery, description: "Managed 30+ successful DR drills for utility and discom clients" }

skills:
  - title: Container & Orchestration
    icon: docker
    skills:
      - { name: Kubernetes, icon: kubernetes, level: 95 }
      - { name: Docker, icon: docker, level: 98 }
      - { name: Helm, icon: helm, level: 90 }
      - { name: ArgoCD, icon: argo, level: 92 }
  - title: Infrastructure as Code
    icon: terraform
    skills:
      - { name: Terraform, icon: terraform, level: 93 }
      - { name: Ansible, icon: ansible, level: 90 }

experience:
  - title: Site Reliability Engineer II
    company: Kimbal Technologies
    location: Delhi, India
    period: Jun 2025 - Present
    duration: Current
    achievements:
      - Implemented multi-level alerting in Zabbix (Email, Teams, PagerDuty)
    technologies: [kubernetes, aws, terraform, argo]
  - title: Site Reliability Engineer
    company: Kimbal Technologies
    location: Delhi, India
    period: Jun 2024 - Jun 2025
    duration: 1 year
    achievements:
      - Built CI/CD pipelines for 10+ microservices
    technologies: [docker, github_actions, ansible]

metrics:
  - { label: Tasks Automated, value: 50-100+, icon: server }
  - { label: Microservices, value: 10+, icon: docker }
  - { label: Deployment Time Reduction, value: 60%, icon: github_actions }
  - { label: DR Drills Managed, value: 30+, icon: shield }

projects:
  - title: GitOps with ArgoCD
    description: Declarative Kubernetes deployments for 10+ microservices.
    image: "☸️"
    category: DevOps
    technologies: [kubernetes, argo, helm]
    links: { github: "https://github.com/shivam2003-dev" }

contact:
  intro: Open to conversations about reliability, automation and infrastructure.
  info:
    - { icon: map_marker, label: Location, value: "Delhi, India" }
    - { icon: email, label: Email, value: shivam.sk2003@gmail.com, href: "mailto:shivam.sk2003@gmail.com" }

resources:
  research:
    title: Research Papers & Articles
    description: Reading that shaped how I think about optimization.
    links:
      - { name: Distill.pub, url: "https://distill.pub", description: Clear explanations of machine learning research }
"#;

const SAMPLE_POST: &str = r#"---
id: 1
slug: why-momentum-really-works
title: Why Momentum Really Works
date: 2025-11-12
author: Shivam Kumar
tags:
  - Machine Learning
  - Optimization
  - Gradient Descent
---

Gradient descent with **momentum** converges faster by remembering where it has been.

## The update rule

Each step mixes the current gradient with the previous step:

```python
z = beta * z + grad(w)
w = w - alpha * z
```

## Further reading

- [Why Momentum Really Works](https://distill.pub/2017/momentum/) on Distill
- The damping factor `beta` is usually close to `0.9`
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("source/_data"))?;

    write(&config_path, CONFIG)?;
    write(&target_dir.join("source/_data/profile.yml"), PROFILE)?;
    write(
        &target_dir.join("source/_posts/why-momentum-really-works.md"),
        SAMPLE_POST,
    )?;

    Ok(())
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}
